#[derive(thiserror::Error, Debug)]
pub enum KuiError {
    #[error("invalid key notation '{text}': {reason}")]
    InvalidNotation { text: String, reason: String },

    #[error("key sequence is empty")]
    EmptySequence,

    #[error("no mapping registered for trigger {0}")]
    MappingNotFound(String),

    #[error("lookahead exceeded {0} keys without resolving a match")]
    LookaheadOverflow(usize),

    #[error("matcher fed while no longer looking")]
    MatcherNotLooking,

    #[error("matcher fed at position {0} beyond the matched prefix")]
    MatcherOutOfSync(usize),

    #[error("read error on input descriptor: {0}")]
    Io(#[source] std::io::Error),
}
