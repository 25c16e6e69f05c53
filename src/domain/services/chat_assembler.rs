use crate::domain::{ConversationMessage, RoleMode};

/// Build the message list for one completion call:
/// the persona's system prompt, then the prior history, then the new user message.
pub fn assemble(
    role_mode: RoleMode,
    history: &[ConversationMessage],
    user_message: &str,
) -> Vec<ConversationMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ConversationMessage::system(role_mode.system_prompt()));
    messages.extend(history.iter().cloned());
    messages.push(ConversationMessage::user(user_message));
    messages
}
