//! Status emoji decoration.
//!
//! Every response carries a `status_emoji` field naming the outcome for a
//! human reader. The token is display-only: it never affects status codes or
//! store behaviour.

/// The request operation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// The outcome category of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    NotFound,
    InvalidInput,
    Failed,
}

/// Maps an operation and its outcome to a display token.
#[must_use]
pub const fn status_emoji(operation: Operation, outcome: Outcome) -> &'static str {
    match (operation, outcome) {
        (Operation::List, Outcome::Success) => "📋",
        (Operation::Get, Outcome::Success) => "🔍",
        (Operation::Create, Outcome::Success) => "✨",
        (Operation::Update, Outcome::Success) => "✏️",
        (Operation::Delete, Outcome::Success) => "🗑️",
        (_, Outcome::NotFound) => "🤷",
        (_, Outcome::InvalidInput) => "⚠️",
        (_, Outcome::Failed) => "💥",
    }
}
