//! Issue a goto and advance it turn by turn through the runtime.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use march_core::{PlayerId, Position, Unit, UnitId, UnitOrder, move_points_text};
use march_runtime::{OracleManager, OrderReport, Runtime, RuntimeConfig};

use crate::content::{ContentArgs, parse_position};

const PLAYER: PlayerId = PlayerId(1);
const UNIT: UnitId = UnitId(1);

/// Issue a goto and run turns of order processing
#[derive(Parser)]
pub struct SimulateCommand {
    #[command(flatten)]
    content: ContentArgs,

    /// Start tile as x,y
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    from: Position,

    /// Destination tile as x,y
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    to: Position,

    /// Maximum number of turns to simulate after the initial order
    #[arg(long, default_value_t = 10)]
    turns: u32,

    /// Print the turn log as JSON
    #[arg(long)]
    json: bool,
}

/// State of the unit after one turn.
#[derive(Serialize)]
struct TurnRecord {
    turn: u32,
    position: Position,
    moves_left: u32,
    orders: Vec<UnitOrder>,
    message: String,
}

#[derive(Serialize)]
struct SimulationLog {
    arrived: bool,
    turns: Vec<TurnRecord>,
}

impl SimulateCommand {
    pub async fn execute(self) -> Result<()> {
        let content = self.content.load()?;
        let config = RuntimeConfig::from_env()?;
        let full_moves = content.unit_type.move_rate_frags(&content.rules.config);
        let move_fragments = content.rules.config.move_fragments;

        let runtime = Runtime::builder()
            .config(config)
            .rules(content.rules)
            .oracles(OracleManager::from_snapshots(content.map, content.unit_types))
            .build()?;

        let unit = Unit::new(UNIT, PLAYER, content.unit_type.id, self.from)
            .with_moves(full_moves)
            .with_health(content.unit_type.hit_points);
        runtime.spawn_unit(unit)?;

        let first = runtime.execute_action(UNIT, "goto", Some(self.to)).await;
        let mut log = SimulationLog {
            arrived: false,
            turns: vec![record(&runtime, 0, first.message.clone())?],
        };
        if !first.success {
            return finish(&log, self.json, move_fragments);
        }

        for turn in 1..=self.turns {
            let current = current_unit(&runtime)?;
            if !current.has_orders() {
                break;
            }
            runtime.refresh_movement(PLAYER).await?;
            let report = runtime.process_unit_orders(PLAYER).await?;
            log.turns.push(record(&runtime, turn, describe(&report))?);
        }

        log.arrived = current_unit(&runtime)?.position == self.to;
        finish(&log, self.json, move_fragments)
    }
}

fn current_unit(runtime: &Runtime) -> Result<Unit> {
    runtime
        .unit(UNIT)?
        .context("simulated unit disappeared")
}

fn record(runtime: &Runtime, turn: u32, message: String) -> Result<TurnRecord> {
    let unit = current_unit(runtime)?;
    Ok(TurnRecord {
        turn,
        position: unit.position,
        moves_left: unit.moves_left,
        orders: unit.orders,
        message,
    })
}

fn describe(report: &OrderReport) -> String {
    if let Some(issue) = report.cancelled.first().or(report.errored.first()) {
        return format!("Order cancelled ({}): {}", issue.code, issue.reason);
    }
    if !report.completed.is_empty() {
        return "Arrived".to_string();
    }
    if !report.advanced.is_empty() {
        return "Advanced".to_string();
    }
    "Idle".to_string()
}

fn finish(log: &SimulationLog, json: bool, move_fragments: u32) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(log)?);
        return Ok(());
    }

    for entry in &log.turns {
        println!(
            "{} {:<10} moves {:>5}  {}",
            style(format!("turn {:>3}", entry.turn)).bold().cyan(),
            entry.position.to_string(),
            move_points_text(entry.moves_left, move_fragments),
            entry.message
        );
    }

    if log.arrived {
        println!("{}", style("Destination reached").green().bold());
    } else {
        println!("{}", style("Destination not reached").yellow().bold());
    }
    Ok(())
}
