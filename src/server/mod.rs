//! Model Context Protocol server speaking line delimited JSON-RPC.
//!
//! Only the subset needed to offer tools is implemented: `initialize`,
//! `ping`, `tools/list`, `tools/call` and cancellation. Every tool call
//! runs in its own task, responses are written in completion order.
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::{AbortHandle, JoinSet},
};
use tracing::{debug, error, info, warn};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

mod jsonrpc;

use crate::{
    error::{Error, Result, ResultExt},
    registry::Registry,
};

use self::jsonrpc::{
    Request, Response, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR,
};

const SERVER_NAME: &str = "mensa-mcp";
/// Supported protocol revisions, preferred first.
const PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];
const INSTRUCTIONS: &str = "Query canteens, opening days and menus of the Studentenwerk Dresden. \
                            Look up canteen ids with list_canteens first.";

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelParams {
    request_id: Value,
}

/// Abort handles of running tool calls by request id.
type InFlight = Arc<Mutex<HashMap<String, AbortHandle>>>;

struct Session {
    registry: Arc<Registry>,
    tx: UnboundedSender<Response>,
    in_flight: InFlight,
    tasks: JoinSet<()>,
}

/// Serve `registry` until `input` is closed.
///
/// Tool calls still running at that point are awaited before returning.
pub async fn serve<R, W>(registry: Arc<Registry>, input: R, output: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_responses(rx, output));
    let mut session = Session {
        registry,
        tx,
        in_flight: InFlight::default(),
        tasks: JoinSet::new(),
    };
    let mut input = BufReader::new(input);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|why| Error::Io(why, "reading a request"))?;
        if read == 0 {
            break;
        }
        while session.tasks.try_join_next().is_some() {}
        match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => session.handle_line(line),
            Err(why) => {
                warn!("Received a message that is not UTF-8: {}", why);
                let message = format!("Parse error: {}", why);
                session.send(Response::error(Value::Null, PARSE_ERROR, message));
            }
        }
    }
    info!(
        "Input closed, waiting for {} running tool calls",
        session.tasks.len()
    );
    while session.tasks.join_next().await.is_some() {}
    // Closes the channel and thereby stops the writer
    drop(session);
    if let Err(why) = writer.await {
        error!("Writing responses failed: {}", why);
    }
    Ok(())
}

impl Session {
    fn handle_line(&mut self, line: &str) {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(why) => {
                warn!("Received malformed message: {}", why);
                let message = format!("Parse error: {}", why);
                self.send(Response::error(Value::Null, PARSE_ERROR, message));
                return;
            }
        };
        let id = jsonrpc::reply_id(&message);
        let request = match Request::from_message(message) {
            Ok(request) => request,
            Err(why) => {
                warn!("Received {}", why);
                self.send(Response::error(id, INVALID_REQUEST, why.to_string()));
                return;
            }
        };
        match (request.method.as_str(), request.id) {
            ("notifications/cancelled", _) => self.cancel(request.params),
            (method, None) => debug!("Ignoring notification {:?}", method),
            ("initialize", Some(id)) => {
                let result = initialize_result(&request.params);
                self.send(Response::success(id, result))
            }
            ("ping", Some(id)) => self.send(Response::success(id, json!({}))),
            ("tools/list", Some(id)) => {
                let tools = json!({ "tools": self.registry.definitions() });
                self.send(Response::success(id, tools))
            }
            ("tools/call", Some(id)) => self.call_tool(id, request.params),
            (method, Some(id)) => {
                let message = format!("Method not found: {}", method);
                self.send(Response::error(id, METHOD_NOT_FOUND, message))
            }
        }
    }

    fn call_tool(&mut self, id: Value, params: Value) {
        let params: CallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(why) => return self.send(Response::error(id, INVALID_PARAMS, why.to_string())),
        };
        let call = match self.registry.call(&params.name, params.arguments) {
            Ok(call) => call,
            Err(why) => return self.send(Response::error(id, INVALID_PARAMS, why.to_string())),
        };
        info!("Calling tool {} for request {}", params.name, id);
        let key = id.to_string();
        let name = params.name;
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let own_key = key.clone();
        // Held until the task is registered, it cannot unregister before
        let mut running = lock(&self.in_flight);
        if running.contains_key(&key) {
            drop(running);
            let message = format!("Request {} is already running", key);
            return self.send(Response::error(id, INVALID_PARAMS, message));
        }
        let handle = self.tasks.spawn(async move {
            let response = match call.await {
                Ok(text) => Response::success(id, tool_result(text)),
                Err(why) => {
                    error!("Tool {} failed: {}", name, why);
                    let code = if why.is_invalid_params() {
                        INVALID_PARAMS
                    } else {
                        INTERNAL_ERROR
                    };
                    Response::error(id, code, why.to_string())
                }
            };
            lock(&in_flight).remove(&own_key);
            // The writer is only gone if the output is broken
            tx.send(response).ok();
        });
        running.insert(key, handle);
    }

    fn cancel(&self, params: Value) {
        let params = serde_json::from_value::<CancelParams>(params)
            .map_err(|why| Error::Deserializing(why, "reading a cancellation"))
            .log_warn();
        if let Some(params) = params {
            let handle = lock(&self.in_flight).remove(&params.request_id.to_string());
            if let Some(handle) = handle {
                info!("Cancelling request {}", params.request_id);
                handle.abort();
            }
        }
    }

    fn send(&self, response: Response) {
        self.tx.send(response).ok();
    }
}

fn initialize_result(params: &Value) -> Value {
    let version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .filter(|version| PROTOCOL_VERSIONS.contains(version))
        .unwrap_or(PROTOCOL_VERSIONS[0]);
    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": INSTRUCTIONS
    })
}

fn tool_result(text: String) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false
    })
}

fn lock(in_flight: &InFlight) -> MutexGuard<'_, HashMap<String, AbortHandle>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn write_responses<W>(mut rx: UnboundedReceiver<Response>, mut output: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        if write_response(&mut output, &response).await.log_err().is_none() {
            break;
        }
    }
    output.shutdown().await.ok();
}

async fn write_response<W>(output: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)
        .map_err(|why| Error::Serializing(why, "writing a response"))?;
    line.push(b'\n');
    output
        .write_all(&line)
        .await
        .map_err(|why| Error::Io(why, "writing a response"))?;
    output
        .flush()
        .await
        .map_err(|why| Error::Io(why, "writing a response"))
}
