pub mod list;
pub mod task;

use serde_json::json;
use todo_core::TodoError;

use crate::output;

/// Blank input is reported as an unsubmitted success, not a failure.
pub(crate) fn skipped_or_err(err: TodoError) -> anyhow::Result<()> {
    match err {
        TodoError::ValidationSkipped(reason) => {
            output::output_success(json!({ "submitted": false, "reason": reason }));
            Ok(())
        }
        other => Err(other.into()),
    }
}
