use alloc::string::String;

/// A failure raised by a template condition.
///
/// The selector never surfaces this: a failing condition counts as a non-match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("template condition failed: {message}")]
pub struct ConditionError {
    pub message: String,
}

impl ConditionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned by [`crate::TemplateRegistry::get`] when no template has the requested name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no template registered under `{name}`")]
pub struct TemplateNotFound {
    pub name: String,
}

/// Errors raised while patching a view slot.
#[derive(Debug, thiserror::Error)]
pub enum PatchError<E> {
    /// The resolved template name has no registered render function.
    ///
    /// This is a configuration error; the list instance should not keep rendering.
    #[error("template `{name}` is not registered")]
    TemplateMissing { name: String },

    /// The rendering engine failed to mount or update the slot's container.
    #[error("render engine failure: {0}")]
    Render(#[source] E),

    /// The slot id does not belong to this slot manager.
    #[error("unknown slot {0}")]
    UnknownSlot(usize),
}

/// Errors surfaced to the list control by [`crate::ListBridge::on_slot_needed`].
#[derive(Debug, thiserror::Error)]
pub enum BridgeError<E> {
    #[error(transparent)]
    Patch(#[from] PatchError<E>),

    /// An earlier `TemplateMissing` has made this list instance unusable.
    #[error("list failed earlier: template `{name}` is not registered")]
    Failed { name: String },
}
