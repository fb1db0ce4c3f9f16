use serde_json::json;
use todo_app::DropTarget;

use super::skipped_or_err;
use crate::cli::{TaskAction, TaskAddArgs};
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add(args) => return handle_add(ctx, args).await,
        TaskAction::Priority {
            list,
            task,
            priority,
        } => {
            ctx.controller.change_priority(&list, &task, priority).await?;
            output::output_success(ctx.controller.list(&list).and_then(|l| l.task(&task)));
        }
        TaskAction::Move {
            from,
            to,
            task,
            priority,
        } => {
            let snapshot = ctx.find_task(&from, &task)?;
            let copy_id = ctx
                .controller
                .move_task(&from, &to, snapshot, priority)
                .await?;
            output::output_success(json!({
                "id": copy_id,
                "from": from,
                "to": to,
                "priority": priority,
            }));
        }
        TaskAction::Drop {
            from,
            task,
            to,
            zone,
        } => {
            if !ctx.controller.drag_start(&from, &task) {
                return output::output_error(&format!(
                    "Task not found: {} in list {}",
                    task, from
                ));
            }
            let target = match zone {
                Some(priority) => DropTarget::Zone {
                    list_id: to,
                    priority,
                },
                None => DropTarget::List(to),
            };
            let action = ctx.controller.drop_on(target).await?;
            output::output_success(action);
        }
    }
    Ok(())
}

async fn handle_add(ctx: &mut CliContext, args: TaskAddArgs) -> anyhow::Result<()> {
    if ctx.controller.list(&args.list).is_none() {
        return output::output_error(&format!("List not found: {}", args.list));
    }

    let input = ctx.controller.task_input_mut(&args.list);
    input.title = args.title;
    input.description = args.description;
    input.due_date = args.due;
    input.priority = args.priority;

    match ctx.controller.submit_new_task(&args.list).await {
        Ok(id) => {
            let task = ctx
                .controller
                .list(&args.list)
                .and_then(|l| l.task(&id));
            output::output_success(json!({
                "submitted": true,
                "id": id,
                "task": task,
            }));
            Ok(())
        }
        Err(e) => skipped_or_err(e),
    }
}
