use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::AppResult;
use crate::geometry::BadgeSize;
use crate::highlight::HighlightId;
use crate::layout::layout_badges;
use crate::session::TaggingSession;
use crate::taxonomy::{all_categories, ElementCategory};

pub const USAGE: &str = "usage: scenetag <command>
  categories                        list element categories
  list <scene>                      list highlights of a scene
  tag <scene> <category> <text...>  tag text in a scene
  remove <id>                       remove one highlight
  clear <scene>                     remove every highlight of a scene
  paint <scene> <file>              print paint ranges for a scene file
  layout <width> <w>x<h>...         lay out badges of the given sizes";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown element category: {0}")]
    UnknownCategory(String),
    #[error("invalid highlight id: {0}")]
    InvalidId(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid badge size (expected <w>x<h>): {0}")]
    InvalidBadgeSize(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Categories,
    List {
        scene_id: String,
    },
    Tag {
        scene_id: String,
        category: ElementCategory,
        text: String,
    },
    Remove {
        id: HighlightId,
    },
    Clear {
        scene_id: String,
    },
    Paint {
        scene_id: String,
        path: PathBuf,
    },
    Layout {
        max_width: f64,
        sizes: Vec<BadgeSize>,
    },
}

/// Parses arguments without the program name.
pub fn parse<I>(args: I) -> CliResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args.next().ok_or(CliError::Usage)?;
    let rest: Vec<String> = args.collect();

    match (command.as_str(), rest.as_slice()) {
        ("categories", []) => Ok(Command::Categories),
        ("list", [scene_id]) => Ok(Command::List {
            scene_id: scene_id.clone(),
        }),
        ("tag", [scene_id, category, text @ ..]) if !text.is_empty() => Ok(Command::Tag {
            scene_id: scene_id.clone(),
            category: ElementCategory::parse(category)
                .ok_or_else(|| CliError::UnknownCategory(category.clone()))?,
            text: text.join(" "),
        }),
        ("remove", [id]) => Ok(Command::Remove {
            id: HighlightId::parse(id).ok_or_else(|| CliError::InvalidId(id.clone()))?,
        }),
        ("clear", [scene_id]) => Ok(Command::Clear {
            scene_id: scene_id.clone(),
        }),
        ("paint", [scene_id, path]) => Ok(Command::Paint {
            scene_id: scene_id.clone(),
            path: PathBuf::from(path),
        }),
        ("layout", [max_width, sizes @ ..]) => Ok(Command::Layout {
            max_width: parse_number(max_width)?,
            sizes: sizes
                .iter()
                .map(String::as_str)
                .map(parse_badge_size)
                .collect::<CliResult<Vec<_>>>()?,
        }),
        ("categories" | "list" | "tag" | "remove" | "clear" | "paint" | "layout", _) => {
            Err(CliError::Usage)
        }
        (other, _) => Err(CliError::UnknownCommand(other.to_string())),
    }
}

pub fn execute<W: Write>(
    command: Command,
    session: &mut TaggingSession,
    out: &mut W,
) -> AppResult<()> {
    match command {
        Command::Categories => {
            for category in all_categories() {
                let meta = category.metadata();
                writeln!(
                    out,
                    "{:<18} {:<18} {:<12} {}",
                    category.tag(),
                    meta.name,
                    meta.icon,
                    meta.color
                )?;
            }
        }
        Command::List { scene_id } => {
            for record in session.store().records_for_scene(&scene_id) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    record.id,
                    record.category.tag(),
                    record.created_at.to_rfc3339(),
                    record.text
                )?;
            }
            for (category, count) in session.store().category_counts(&scene_id) {
                writeln!(out, "# {category}: {count}")?;
            }
        }
        Command::Tag {
            scene_id,
            category,
            text,
        } => match session.tag(&scene_id, category, &text) {
            Some(record) => writeln!(out, "{}", record.id)?,
            None => writeln!(out, "nothing to tag")?,
        },
        Command::Remove { id } => {
            if !session.remove(id) {
                writeln!(out, "no highlight with id {id}")?;
            }
        }
        Command::Clear { scene_id } => {
            let removed = session.clear_scene(&scene_id);
            writeln!(out, "removed {removed}")?;
        }
        Command::Paint { scene_id, path } => {
            let text = std::fs::read_to_string(&path)?;
            for range in session.paint_ranges(&scene_id, &text) {
                writeln!(
                    out,
                    "{}..{}\t{}\t{}\t{}",
                    range.start,
                    range.end,
                    range.category.tag(),
                    range.color,
                    &text[range.range()]
                )?;
            }
        }
        Command::Layout { max_width, sizes } => {
            let layout = layout_badges(&sizes, max_width, session.config().badge_spacing);
            for position in &layout.positions {
                writeln!(out, "{} {}", position.x, position.y)?;
            }
            writeln!(out, "size {}x{}", layout.width, layout.height)?;
        }
    }
    Ok(())
}

fn parse_number(value: &str) -> CliResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| CliError::InvalidNumber(value.to_string()))
}

fn parse_badge_size(value: &str) -> CliResult<BadgeSize> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| CliError::InvalidBadgeSize(value.to_string()))?;
    let width = parse_number(width).map_err(|_| CliError::InvalidBadgeSize(value.to_string()))?;
    let height =
        parse_number(height).map_err(|_| CliError::InvalidBadgeSize(value.to_string()))?;
    Ok(BadgeSize::new(width, height))
}
