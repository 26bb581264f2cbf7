//! MCP server loop over stdio: newline-delimited JSON-RPC

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::core::client::DeepLClient;
use crate::core::errors::Result;
use crate::server::protocol::{
    initialize_result, CallToolResult, JsonRpcRequest, JsonRpcResponse, TextContent,
    INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::server::tools;

/// MCP server state shared across requests.
///
/// The DeepL client is constructed lazily on the first `tools/call` and
/// reused for the process lifetime; the `OnceCell` guard keeps construction
/// single-shot even if two calls race on it.
pub struct McpServer {
    client: OnceCell<DeepLClient>,
}

impl McpServer {
    /// Create a new server with no client constructed yet
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    /// Create a server around an already-constructed client
    pub fn with_client(client: DeepLClient) -> Self {
        Self {
            client: OnceCell::from(client),
        }
    }

    /// Get or lazily construct the DeepL client.
    ///
    /// A missing credential fails construction permanently; the error flows
    /// through the same envelope as handler failures.
    async fn provider(&self) -> Result<&DeepLClient> {
        self.client
            .get_or_try_init(|| async { DeepLClient::from_env() })
            .await
    }

    /// Run the server until stdin closes
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        info!("MCP server listening on stdio");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            if let Some(response) = response {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                stdout.write_all(&payload).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");

        Ok(())
    }

    /// Handle one request; notifications produce no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Handling method: {}", request.method);

        // Requests without an id are notifications
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => Some(JsonRpcResponse::result(id?, initialize_result())),
            "ping" => Some(JsonRpcResponse::result(id?, serde_json::json!({}))),
            "tools/list" => Some(JsonRpcResponse::result(
                id?,
                serde_json::json!({ "tools": tools::list_tools() }),
            )),
            "tools/call" => {
                let id = id?;

                let name = match request.params.get("name").and_then(Value::as_str) {
                    Some(name) => name,
                    None => {
                        return Some(JsonRpcResponse::error(
                            id,
                            INVALID_PARAMS,
                            "missing tool name",
                        ))
                    }
                };
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| serde_json::json!({}));

                let content = match self.provider().await {
                    Ok(provider) => tools::call_tool(name, &arguments, provider).await,
                    Err(e) => TextContent::new(tools::render_error(&e)),
                };

                let result = serde_json::json!(CallToolResult::new(content));
                Some(JsonRpcResponse::result(id, result))
            }
            method if method.starts_with("notifications/") => None,
            method => {
                debug!("Unknown method: {}", method);
                Some(JsonRpcResponse::error(
                    id?,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", method),
                ))
            }
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}
