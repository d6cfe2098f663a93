//! Compute a route for a unit type and print it.

use anyhow::Result;
use clap::Parser;
use console::style;

use march_core::{PathFinder, PathResult, PlayerId, Position, move_points_text};

use crate::content::{ContentArgs, parse_position};

/// Compute and print a route
#[derive(Parser)]
pub struct PathCommand {
    #[command(flatten)]
    content: ContentArgs,

    /// Start tile as x,y
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    from: Position,

    /// Destination tile as x,y
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    to: Position,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,
}

impl PathCommand {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load()?;
        let rules = &content.rules;
        let profile = content
            .unit_type
            .movement_profile(PlayerId(1), &rules.config);

        let path = PathFinder::new(&rules.terrain, &content.map).find_path(self.from, self.to, &profile);
        tracing::debug!(valid = path.valid, tiles = path.len(), "route computed");

        if self.json {
            println!("{}", route_json(&path)?);
        } else {
            print_route(&path, &content.unit_type.name, rules.config.move_fragments);
        }

        if !path.valid {
            anyhow::bail!("No valid path from {} to {}", self.from, self.to);
        }
        Ok(())
    }
}

fn print_route(path: &PathResult, unit_type: &str, move_fragments: u32) {
    println!("{} {}", style("Unit type:").bold().cyan(), unit_type);

    if !path.valid {
        println!("{}", style("No route").red().bold());
        return;
    }

    for (step, tile) in path.tiles.iter().enumerate() {
        let heading = tile
            .direction
            .map(|direction| format!("{} ({direction:?})", direction.code()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>3}  {:<10} cost {:>5}  next {}",
            step,
            tile.position.to_string(),
            move_points_text(tile.cost, move_fragments),
            heading
        );
    }

    println!(
        "{} {} move points, {} turn(s)",
        style("Total:").bold().green(),
        move_points_text(path.total_cost, move_fragments),
        path.estimated_turns
    );
}

/// Route as pretty JSON; each tile's `direction` is the 0..=7 code.
fn route_json(path: &PathResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use march_core::{Direction, PathTile};

    #[test]
    fn json_carries_direction_codes() {
        let path = PathResult {
            tiles: vec![
                PathTile {
                    position: Position::new(4, 4),
                    cost: 0,
                    direction: Some(Direction::SouthWest),
                },
                PathTile {
                    position: Position::new(3, 5),
                    cost: 4,
                    direction: None,
                },
            ],
            total_cost: 4,
            estimated_turns: 1,
            valid: true,
        };

        let json: serde_json::Value = serde_json::from_str(&route_json(&path).unwrap()).unwrap();
        assert_eq!(json["tiles"][0]["direction"], 5);
        assert!(json["tiles"][1]["direction"].is_null());
        assert_eq!(json["total_cost"], 4);

        let back: PathResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }
}
