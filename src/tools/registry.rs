use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::Tool;
use crate::tools::headlines::HeadlinesTool;

#[derive(Clone)]
pub struct Registry {
    by_name: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
}

impl Registry {
    pub fn with_tools<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<T>>,
        T: Tool + 'static,
    {
        let mut map: HashMap<&'static str, Arc<dyn Tool>> = HashMap::new();
        for t in iter.into_iter() {
            map.insert(t.name(), t);
        }
        Self {
            by_name: Arc::new(map),
        }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.by_name
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub async fn call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let t = self
            .by_name
            .get(name)
            .ok_or_else(|| format!("unknown tool: {name}"))?;
        t.call(args).await.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

pub fn build_registry() -> Registry {
    Registry::with_tools([Arc::new(HeadlinesTool::from_env())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::ToolError;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &'static str {
            "test.echo"
        }
        fn description(&self) -> &'static str {
            "echo tool"
        }
        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({"type":"object"})
        }
        async fn call(&self, args: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
            Ok(args.clone())
        }
    }

    #[tokio::test]
    async fn registry_registers_lists_and_calls() {
        let reg = Registry::with_tools([Arc::new(Echo)]);
        let metas = reg.list();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "test.echo");
        let out = reg
            .call("test.echo", &serde_json::json!({"x": 2}))
            .await
            .unwrap();
        assert_eq!(out["x"], 2);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let reg = Registry::with_tools([Arc::new(Echo)]);
        let err = reg
            .call("does.not.exist", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.contains("unknown tool"));
    }

    #[tokio::test]
    async fn default_registry_exposes_latest_headlines() {
        let reg = build_registry();
        let metas = reg.list();
        assert!(metas.iter().any(|m| m.name == "news.latest_headlines"));
        let schema = &metas[0].input_schema;
        assert!(schema["properties"]["category"]["enum"].is_array());
    }
}
