use http::HeaderMap;

/// Inbound unary call as handed over by the transport
#[derive(Debug, Clone)]
pub struct RpcRequest<T> {
    /// Fully-qualified procedure, e.g. `/acme.orders.v1.OrderService/GetOrder`
    pub procedure: String,
    pub headers: HeaderMap,
    pub message: T,
}

impl<T> RpcRequest<T> {
    pub fn new(procedure: impl Into<String>, message: T) -> Self {
        Self {
            procedure: procedure.into(),
            headers: HeaderMap::new(),
            message,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Header value as text, `None` when absent or not visible ASCII
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
