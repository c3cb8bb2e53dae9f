use amep_config::AmepConfig;
use amep_core::{GradeSubmission, MilestoneRejection, MilestoneReview};
use amep_dashboard::grading::{approve_milestone, grading_queue, reject_milestone, submit_grade};

use crate::cli::{
    GlobalFlags, GradeArgs, GradingCommands, GradingQueueArgs, MilestoneArgs, MilestoneRejectArgs,
};
use crate::output::output;

pub async fn handle(
    action: &GradingCommands,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    match action {
        GradingCommands::Queue(args) => queue(args, flags, config).await,
        GradingCommands::Grade(args) => grade(args, flags, config).await,
        GradingCommands::Approve(args) => approve(args, flags, config).await,
        GradingCommands::Reject(args) => reject(args, flags, config).await,
    }
}

async fn queue(
    args: &GradingQueueArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let queue = grading_queue(&api, &identity.user_id, config.api.branch_timeout()).await?;

    let mut items = if args.pending {
        queue.pending()
    } else {
        queue.items
    };
    items.truncate(super::effective_limit(flags, config));
    output(&items, flags.format)
}

async fn grade(args: &GradeArgs, flags: &GlobalFlags, config: &AmepConfig) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let mut queue = grading_queue(&api, &identity.user_id, config.api.branch_timeout()).await?;

    submit_grade(
        &api,
        &mut queue,
        &args.id,
        &GradeSubmission {
            grade: args.grade,
            feedback: args.feedback.clone(),
            annotations: vec![],
        },
    )
    .await?;

    output_patched(&queue, &args.id, flags)
}

async fn approve(
    args: &MilestoneArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let mut queue = grading_queue(&api, &identity.user_id, config.api.branch_timeout()).await?;

    approve_milestone(
        &api,
        &mut queue,
        &args.project_id,
        &args.milestone_id,
        &MilestoneReview {
            feedback: args.feedback.clone(),
            annotations: vec![],
        },
    )
    .await?;

    output_patched(&queue, &args.milestone_id, flags)
}

async fn reject(
    args: &MilestoneRejectArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let mut queue = grading_queue(&api, &identity.user_id, config.api.branch_timeout()).await?;

    reject_milestone(
        &api,
        &mut queue,
        &args.project_id,
        &args.milestone_id,
        &MilestoneRejection {
            reason: args.reason.clone(),
            annotations: vec![],
        },
    )
    .await?;

    output_patched(&queue, &args.milestone_id, flags)
}

/// Print the patched queue entry so the caller sees the post-mutation state
/// without a second fetch.
fn output_patched(
    queue: &amep_dashboard::GradingQueue,
    item_id: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match queue.items.iter().find(|i| i.item_id == item_id) {
        Some(item) => output(item, flags.format),
        None => anyhow::bail!("item '{item_id}' is not in the grading queue"),
    }
}
