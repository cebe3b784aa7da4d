use bytes::Bytes;

/// Result of racing one batch of upstreams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Authoritative(Bytes),
    /// Body of the first soft failure to complete in the batch.
    SoftFailure(Bytes),
    AllHard,
}

/// What the relay hands back to ingress for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Answer(Bytes),
    Exhausted,
}
