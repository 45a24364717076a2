//! Explicit table of the tools offered to the host.
use futures::future::{BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use std::{future::Future, sync::Arc};

use crate::{
    error::{Error, Result},
    request::Api,
    tools::{Clock, DaysParams, MealsParams, Tools},
};

type Handler = Box<dyn Fn(Value) -> BoxFuture<'static, Result<String>> + Send + Sync>;

struct Entry {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    handler: Handler,
}

/// Tool description as announced to the host.
#[derive(Debug, Serialize)]
pub struct ToolDefinition<'r> {
    pub name: &'r str,
    pub description: &'r str,
    #[serde(rename = "inputSchema")]
    pub input_schema: &'r Value,
}

#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Registering a name twice replaces the former tool.
    pub fn register<F, Fut>(
        &mut self,
        name: &'static str,
        description: &'static str,
        input_schema: Value,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        self.entries.retain(|entry| entry.name != name);
        self.entries.push(Entry {
            name,
            description,
            input_schema,
            handler: Box::new(move |args| handler(args).boxed()),
        });
        self
    }

    /// All tools in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition<'_>> {
        self.entries
            .iter()
            .map(|entry| ToolDefinition {
                name: entry.name,
                description: entry.description,
                input_schema: &entry.input_schema,
            })
            .collect()
    }

    /// Invoke the tool `name`.
    ///
    /// The returned future does not borrow the registry and may be spawned.
    pub fn call(&self, name: &str, arguments: Value) -> Result<BoxFuture<'static, Result<String>>> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_owned()))?;
        Ok((entry.handler)(arguments))
    }
}

/// Registry with the canteen tools backed by `tools`.
pub fn canteen_tools<A, C>(tools: Arc<Tools<A, C>>) -> Registry
where
    A: Api + 'static,
    C: Clock + 'static,
{
    let mut registry = Registry::new();
    let list = Arc::clone(&tools);
    registry.register(
        "list_canteens",
        "List all canteens of the Studentenwerk Dresden with their ids, names, \
         addresses and coordinates.",
        json!({
            "type": "object",
            "properties": {}
        }),
        move |_| {
            let tools = Arc::clone(&list);
            async move { tools.list_canteens().await }
        },
    );
    let days = Arc::clone(&tools);
    registry.register(
        "list_canteen_days",
        "List the days for which a canteen has published meal data, \
         including whether it is open or closed on that day.",
        json!({
            "type": "object",
            "properties": {
                "canteen_id": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Id of the canteen, e.g. 9 for Alte Mensa"
                }
            },
            "required": ["canteen_id"]
        }),
        move |args| {
            let tools = Arc::clone(&days);
            async move {
                let params: DaysParams = parse_arguments(args)?;
                tools.list_canteen_days(params.canteen_id).await
            }
        },
    );
    let meals = tools;
    registry.register(
        "get_meals",
        "Get the meals of a canteen on a date with names, categories, prices \
         and dietary notes. Use list_canteens to find the canteen id and \
         list_canteen_days to see which dates have data.",
        json!({
            "type": "object",
            "properties": {
                "canteen_id": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Id of the canteen, e.g. 9 for Alte Mensa"
                },
                "date": {
                    "type": "string",
                    "description": "Date in YYYY-MM-DD format, e.g. 2026-01-13. Defaults to today."
                }
            },
            "required": ["canteen_id"]
        }),
        move |args| {
            let tools = Arc::clone(&meals);
            async move {
                let params: MealsParams = parse_arguments(args)?;
                tools
                    .get_meals(params.canteen_id, params.date.as_deref())
                    .await
            }
        },
    );
    registry
}

fn parse_arguments<T: DeserializeOwned>(args: Value) -> Result<T> {
    // Hosts may omit the arguments of tools without required parameters
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|why| Error::InvalidArguments(why.to_string()))
}
