use amep_config::AmepConfig;
use amep_core::{NewIntervention, responses::InterventionBoardResponse};
use amep_dashboard::interventions::{
    complete_intervention, create_intervention, filter_rows, intervention_board,
};

use crate::cli::{
    GlobalFlags, InterventionCommands, InterventionCompleteArgs, InterventionCreateArgs,
    InterventionListArgs,
};
use crate::output::output;

pub async fn handle(
    action: &InterventionCommands,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    match action {
        InterventionCommands::List(args) => list(args, flags, config).await,
        InterventionCommands::Create(args) => create(args, flags, config).await,
        InterventionCommands::Complete(args) => complete(args, flags, config).await,
    }
}

async fn list(
    args: &InterventionListArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let board = intervention_board(&api, &identity.user_id, config.api.branch_timeout()).await?;

    // Filters never refetch; they narrow the already-merged rows.
    let mut rows = if args.status.is_some() || args.severity.is_some() {
        filter_rows(
            &board.rows,
            args.status.map(Into::into),
            args.severity.map(Into::into),
        )
    } else {
        board.rows
    };
    rows.truncate(super::effective_limit(flags, config));

    output(
        &InterventionBoardResponse {
            rows,
            recommendations: board.recommendations,
        },
        flags.format,
    )
}

async fn create(
    args: &InterventionCreateArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, _) = super::teacher_client(config).await?;
    let created = create_intervention(
        &api,
        &NewIntervention {
            student_id: args.student_id.clone(),
            kind: args.kind.clone(),
            description: args.description.clone(),
        },
    )
    .await?;
    output(&created, flags.format)
}

async fn complete(
    args: &InterventionCompleteArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, _) = super::teacher_client(config).await?;
    let completed = complete_intervention(&api, &args.id, args.notes.as_deref()).await?;
    output(&completed, flags.format)
}
