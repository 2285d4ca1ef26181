//! `\asarg{text}`: invoke `text` as a command name

use crate::core::engine::{Expansion, MacroInput};
use crate::core::session::Session;
use crate::utils::error::MacroResult;
use crate::utils::names::trim_spaces;

/// Re-inject the trimmed argument as `\text`. Any text is accepted; a name
/// nobody handles is left for the host to complain about.
pub(crate) fn as_arg(
    command: &str,
    session: &mut Session,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let arg = input.get_argument(command)?;
    let arg = trim_spaces(&arg);
    if arg.is_empty() {
        session.note(format!("\\{} called with a blank argument", command));
    }
    Ok(Expansion::Rescan(format!("\\{}", arg)))
}
