use crate::ua;

/// Index of a registered endpoint configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointConfigIdx(pub u32);

/// Index of a registered secure-channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScConfigIdx(pub u32);

/// Server-side operation limits.
///
/// All caps are inclusive; 0 is not a valid cap.
#[derive(Debug, Clone)]
pub struct ServerLimits {
    /// Hard cap on references returned per browsed node, regardless of the requested maximum.
    pub max_references_per_node: usize,
    /// Cap on matched targets per browse path.
    pub max_browse_path_matches: usize,
    /// Cap on out-of-server remainders per browse path.
    pub max_browse_path_remaining: usize,
    /// Cap on concurrently open sessions.
    pub max_sessions: usize,
    /// Cap on operations per batched service request.
    pub max_operations_per_request: usize,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            max_references_per_node: 1000,
            max_browse_path_matches: 10,
            max_browse_path_remaining: 10,
            max_sessions: 20,
            max_operations_per_request: 500,
        }
    }
}

/// Configuration of one server endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub url: ua::String,
    pub security_policy_uri: ua::String,
    pub server_certificate: ua::ByteString,
}

/// Configuration of one secure channel.
#[derive(Debug, Clone)]
pub struct ScConfig {
    pub url: ua::String,
    pub security_policy_uri: ua::String,
    pub requested_lifetime_ms: u32,
}

/// Static configuration of the stack: registered endpoint and secure-channel configurations plus
/// the server limits.
///
/// Configurations are registered before the dispatcher starts and addressed by index afterwards.
#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    limits: ServerLimits,
    endpoints: Vec<EndpointConfig>,
    secure_channels: Vec<ScConfig>,
}

impl StackConfig {
    #[must_use]
    pub fn new(limits: ServerLimits) -> Self {
        Self {
            limits,
            endpoints: Vec::new(),
            secure_channels: Vec::new(),
        }
    }

    #[must_use]
    pub const fn limits(&self) -> &ServerLimits {
        &self.limits
    }

    /// Registers an endpoint configuration and returns its index.
    pub fn add_endpoint(&mut self, config: EndpointConfig) -> EndpointConfigIdx {
        self.endpoints.push(config);
        EndpointConfigIdx(u32::try_from(self.endpoints.len() - 1).unwrap_or(u32::MAX))
    }

    /// Registers a secure-channel configuration and returns its index.
    pub fn add_secure_channel(&mut self, config: ScConfig) -> ScConfigIdx {
        self.secure_channels.push(config);
        ScConfigIdx(u32::try_from(self.secure_channels.len() - 1).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn endpoint(&self, index: EndpointConfigIdx) -> Option<&EndpointConfig> {
        self.endpoints.get(usize::try_from(index.0).unwrap_or(usize::MAX))
    }

    #[must_use]
    pub fn secure_channel(&self, index: ScConfigIdx) -> Option<&ScConfig> {
        self.secure_channels.get(usize::try_from(index.0).unwrap_or(usize::MAX))
    }
}
