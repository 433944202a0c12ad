/// Errors a build can fail with.
///
/// Only input that cannot be read as structured data at all is fatal.
/// Problems with a single element or a single rule never surface here.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("computed-style dump is not a valid snapshot list: {source}")]
    MalformedDump {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid build configuration: {source}")]
    InvalidConfig {
        #[source]
        source: serde_json::Error,
    },
}
