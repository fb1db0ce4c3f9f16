use serde_json::json;

use super::skipped_or_err;
use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &mut CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create { name } => {
            *ctx.controller.new_list_name_mut() = name;
            match ctx.controller.submit_new_list().await {
                Ok(id) => {
                    let list = ctx.controller.list(&id);
                    output::output_success(json!({
                        "submitted": true,
                        "id": id,
                        "list": list,
                    }));
                }
                Err(e) => return skipped_or_err(e),
            }
        }
        ListAction::Show => {
            output::output_list(ctx.list_views());
        }
    }
    Ok(())
}
