//! Audit history command

use crate::console::Console;
use crate::display::audit::format_history;
use crate::error::CreatorFlowResult;

/// Print the audit trail, either for one record or the most recent entries
pub fn handle_history_command(
    console: &Console,
    entity: Option<String>,
    limit: usize,
) -> CreatorFlowResult<()> {
    let audit = console.storage().audit();
    let entries = match entity.as_deref() {
        Some(id) => {
            let mut entries = audit.read_for_entity(id)?;
            let start = entries.len().saturating_sub(limit);
            entries.split_off(start)
        }
        None => audit.read_recent(limit)?,
    };

    println!("{}", format_history(&entries));
    Ok(())
}
