//! Line-oriented command loop over a [`Controller`].

use crate::controller::{Controller, Surface};
use crate::error::AppError;
use crate::service::ClusteringService;
use crate::validate::parse_integer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
Commands:
  generate N W H     generate N houses in a W x H space
  compute K          place K hospitals
  k K                set k for the next analysis
  analyze            compare k = 2..k_max
  next | prev        step through the K-Means iterations
  center I           zoom onto hospital I (1-based)
  reset              show the whole space again
  size houses|clusters|hospitals R
                     point radius (1-30)
  show               print the current panels again
  help               this text
  quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTarget {
    Houses,
    Clusters,
    Hospitals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate { count: i64, width: i64, height: i64 },
    Compute(i64),
    SetK(i64),
    Analyze,
    Next,
    Prev,
    /// 1-based hospital number
    Center(i64),
    Reset,
    Size(SizeTarget, i64),
    Show,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn arg<'a>(args: &[&'a str], index: usize, field: &str) -> Result<&'a str, AppError> {
    args.get(index)
        .copied()
        .ok_or_else(|| AppError::validation(format!("missing {}", field)))
}

fn integer(args: &[&str], index: usize, field: &str) -> Result<i64, AppError> {
    parse_integer(field, arg(args, index, field)?)
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, AppError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "generate" | "gen" => Command::Generate {
            count: integer(args, 0, "house count")?,
            width: integer(args, 1, "width")?,
            height: integer(args, 2, "height")?,
        },
        "compute" => Command::Compute(integer(args, 0, "k")?),
        "k" => Command::SetK(integer(args, 0, "k")?),
        "analyze" => Command::Analyze,
        "next" => Command::Next,
        "prev" | "previous" => Command::Prev,
        "center" => Command::Center(integer(args, 0, "hospital number")?),
        "reset" => Command::Reset,
        "size" => {
            let target = match arg(args, 0, "size target")? {
                "houses" => SizeTarget::Houses,
                "clusters" => SizeTarget::Clusters,
                "hospitals" => SizeTarget::Hospitals,
                other => {
                    return Err(AppError::validation(format!(
                        "unknown size target {:?} (houses, clusters or hospitals)",
                        other
                    )));
                }
            };
            Command::Size(target, integer(args, 1, "radius")?)
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Ok(Some(command))
}

/// Run one command against the controller
///
/// Failed actions were already reported to the surface by the controller.
pub async fn execute<S, U>(controller: &Controller<S, U>, command: Command) -> Flow
where
    S: ClusteringService,
    U: Surface,
{
    let result = match command {
        Command::Generate {
            count,
            width,
            height,
        } => controller.generate_points(count, width, height).await.map(drop),
        Command::Compute(k) => controller.compute_clustering(k).await.map(drop),
        Command::SetK(k) => {
            controller.set_k_input(k);
            Ok(())
        }
        Command::Analyze => controller.analyze_optimal_k().await.map(drop),
        Command::Next => {
            if !controller.next_iteration() {
                controller.notify("Already at the last iteration");
            }
            Ok(())
        }
        Command::Prev => {
            if !controller.previous_iteration() {
                controller.notify("Already at the first iteration");
            }
            Ok(())
        }
        Command::Center(number) => {
            let moved = usize::try_from(number)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .is_some_and(|index| controller.center_on_hospital(index));
            if !moved {
                controller.notify(&format!("No hospital #{} to center on", number));
            }
            Ok(())
        }
        Command::Reset => {
            if !controller.reset_view() {
                controller.notify("Nothing to reset; compute the hospitals first");
            }
            Ok(())
        }
        Command::Size(target, radius) => {
            let radius = u32::try_from(radius.max(0)).unwrap_or(u32::MAX);
            match target {
                SizeTarget::Houses => controller.set_house_radius(radius),
                SizeTarget::Clusters => controller.set_cluster_radius(radius),
                SizeTarget::Hospitals => controller.set_centroid_radius(radius),
            }
            Ok(())
        }
        Command::Show => {
            controller.render_stats();
            controller.render_result();
            controller.render_metrics();
            controller.render_quality();
            Ok(())
        }
        Command::Help => {
            controller.notify(HELP);
            Ok(())
        }
        Command::Quit => return Flow::Quit,
        Command::Unknown(name) => {
            controller.notify(&format!("Unknown command {:?}\n{}", name, HELP));
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::debug!(%err, "command failed");
    }
    Flow::Continue
}

/// Read commands until `quit` or end of input
pub async fn run<S, U, R>(controller: &Controller<S, U>, input: R) -> anyhow::Result<()>
where
    S: ClusteringService,
    U: Surface,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                controller.notify(&err.to_string());
                continue;
            }
        };
        tracing::debug!(?command, "executing");
        if execute(controller, command).await == Flow::Quit {
            break;
        }
    }
    Ok(())
}
