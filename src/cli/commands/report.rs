//! Report command implementation.
//!
//! Drives one pass of the report form: fill the draft from the flags,
//! optionally attach a photo and the current position, then submit.

use anyhow::{Context, Result, bail};
use roadwatch_lib::{
    CollectingNotifier, Coordinates, DraftField, FixedPosition, FormSession, GeolocationProvider,
    GeolocationResolver, ImageEncoder, LogSink, NoGeolocation, Notifier, Outcome, PositionOptions,
    SubmissionContext, render_card,
};

use crate::cli::{CommandContext, ReportArgs};
use crate::format::{ReportOutput, format_card, format_field_errors, format_notice, print_json};

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if the image cannot be attached, the sink refuses the
/// report, or the draft fails validation.
pub fn execute(args: &ReportArgs, ctx: &CommandContext) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    let output = runtime.block_on(submit_report(args, ctx))?;

    if ctx.json {
        print_json(&output)?;
    } else {
        print_text(&output);
    }

    match output {
        ReportOutput::Accepted { .. } => Ok(()),
        ReportOutput::Rejected { errors, .. } => {
            bail!("Report rejected: {} field(s) need attention", errors.len())
        }
    }
}

async fn submit_report(args: &ReportArgs, ctx: &CommandContext) -> Result<ReportOutput> {
    let notifier = CollectingNotifier::default();
    let mut form = FormSession::new(ctx.config.draft_defaults()?);
    fill_draft(&mut form, args);

    if args.use_current_location {
        let options = ctx.config.position_options();
        let fix = match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => ctx.config.fixed_position(),
        };
        match fix {
            Some(coords) => locate(&mut form, FixedPosition(coords), options, &notifier).await,
            None => locate(&mut form, NoGeolocation, options, &notifier).await,
        }
    }

    let encoder = ImageEncoder::new().max_bytes(ctx.config.image.max_bytes);
    form.select_image(&encoder, args.image.as_deref())
        .await
        .context("Failed to attach image")?;

    let sink = LogSink::new(ctx.config.submission.id_prefix.clone());
    let submission = SubmissionContext::new(&sink, &notifier, &ctx.session);
    let outcome = form.submit(&submission).await?;

    Ok(match outcome {
        Outcome::Accepted(record) => ReportOutput::Accepted {
            card: render_card(&record),
            record,
            notices: notifier.drain(),
        },
        Outcome::Rejected(errors) => ReportOutput::Rejected {
            errors,
            notices: notifier.drain(),
        },
    })
}

/// Copy the flags into the draft. Absent flags leave the defaults alone.
fn fill_draft(form: &mut FormSession, args: &ReportArgs) {
    let fields = [
        (DraftField::Title, &args.title),
        (DraftField::Description, &args.description),
        (DraftField::Location, &args.location),
        (DraftField::Type, &args.type_),
        (DraftField::Severity, &args.severity),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }
}

async fn locate<P: GeolocationProvider>(
    form: &mut FormSession,
    provider: P,
    options: PositionOptions,
    notifier: &dyn Notifier,
) {
    let resolver = GeolocationResolver::new(provider).with_options(options);
    if !form.use_current_location(&resolver, notifier).await {
        tracing::info!("Keeping the location entered manually");
    }
}

fn print_text(output: &ReportOutput) {
    match output {
        ReportOutput::Accepted { card, notices, .. } => {
            for notice in notices {
                println!("{}", format_notice(notice));
            }
            println!();
            print!("{}", format_card(card));
        }
        ReportOutput::Rejected { errors, notices } => {
            for notice in notices {
                println!("{}", format_notice(notice));
            }
            println!("Report not submitted. Please fix:");
            print!("{}", format_field_errors(errors));
        }
    }
}
