use super::economy::{Resources, Roster, RosterEntry};
use anyhow::{anyhow, ensure, Context, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Largest `ITEM*n` repeat a record may carry
pub const MAX_COPIES: usize = 1000;

/// One timestamped snapshot of an agent's economy, as reported by the game
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: u32,
    pub owner: String,
    pub resources: Resources,
    pub roster: Roster,
}

impl Observation {
    /// Parse a whole history, one record per non-empty line.
    /// Lines starting with `#` are ignored.
    pub fn parse_history(text: &str) -> Result<Vec<Observation>> {
        text.lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(num, line)| {
                line.parse()
                    .with_context(|| format!("Invalid observation on line {}", num + 1))
            })
            .collect()
    }
}

/// `<timestamp>,<owner>,<mineral>,<vespene>,<used>/<cap>:<item>,<item>,...`
///
/// - A roster item may be written `ITEM*n` for `n` copies.
/// - A roster item may carry its own creation time as `ITEM@t`; otherwise
///   the record's timestamp is used.
impl FromStr for Observation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (header, roster) = s.split_once(':').unwrap_or((s, ""));

        let fields: Vec<_> = header.split(',').map(str::trim).collect();
        ensure!(
            fields.len() == 5,
            "Expected 5 header fields, found {}",
            fields.len()
        );

        let timestamp = fields[0].parse().context("Invalid timestamp")?;
        let owner = fields[1].to_string();
        ensure!(!owner.is_empty(), "Missing owner");

        let mineral: f64 = fields[2].parse().context("Invalid mineral")?;
        let vespene: f64 = fields[3].parse().context("Invalid vespene")?;
        ensure!(
            mineral >= 0.0 && vespene >= 0.0,
            "Resources cannot be negative"
        );

        let (used, cap) = fields[4]
            .split_once('/')
            .ok_or_else(|| anyhow!("Supply must be written used/cap"))?;
        let supply_used = used.trim().parse().context("Invalid supply used")?;
        let supply_cap = cap.trim().parse().context("Invalid supply cap")?;

        let mut entries = Vec::new();
        for token in roster.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (token, created_at) = match token.split_once('@') {
                Some((item, at)) => (
                    item,
                    at.parse()
                        .with_context(|| format!("Invalid creation time in {}", token))?,
                ),
                None => (token, timestamp),
            };

            let (item, copies) = match token.split_once('*') {
                Some((item, n)) => (
                    item,
                    n.parse::<usize>()
                        .with_context(|| format!("Invalid count in {}", token))?,
                ),
                None => (token, 1),
            };

            ensure!(!item.is_empty(), "Empty roster item");
            ensure!(
                copies <= MAX_COPIES,
                "Count in {} exceeds {}",
                token,
                MAX_COPIES
            );
            entries.extend(std::iter::repeat_n(RosterEntry::new(item, created_at), copies));
        }

        Ok(Observation {
            timestamp,
            owner,
            resources: Resources::new(mineral, vespene, supply_used, supply_cap),
            roster: Roster::new(entries),
        })
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}/{}:",
            self.timestamp,
            self.owner,
            self.resources.mineral,
            self.resources.vespene,
            self.resources.supply_used,
            self.resources.supply_cap
        )?;

        let mut first = true;
        let entries = self.roster.entries();
        let mut idx = 0;
        while idx < entries.len() {
            let entry = &entries[idx];
            let run = entries[idx..]
                .iter()
                .take_while(|other| *other == entry)
                .count();

            if !first {
                write!(f, ",")?;
            }
            first = false;

            write!(f, "{}", entry.item)?;
            if run > 1 {
                write!(f, "*{}", run)?;
            }
            if entry.created_at != self.timestamp {
                write!(f, "@{}", entry.created_at)?;
            }
            idx += run;
        }

        Ok(())
    }
}
