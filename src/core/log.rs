use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 48;

fn ansi_codes() -> Option<Regex> {
    Regex::new(r"\x1B\[[0-9;]*[mK]").ok()
}

/// Printable width of a string that may carry ANSI color codes.
fn visible_len(ansi: Option<&Regex>, s: &str) -> usize {
    match ansi {
        Some(re) => re.replace_all(s, "").chars().count(),
        None => s.chars().count(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "status" => Colour::Yellow,
        "cancel" => Colour::Red,
        "enroll" | "lesson" | "aircraft" => Colour::Cyan,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::load(pool)?;

        println!("📜 Audit log:\n");
        if entries.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let ansi = ansi_codes();

        for e in &entries {
            let color = color_for_operation(&e.operation);

            // operation colored, target plain, truncated on visible width
            let mut target = e.target.clone();
            let budget = MAX_OP_WIDTH.saturating_sub(e.operation.chars().count() + 3);
            if target.chars().count() > budget {
                target = target.chars().take(budget.saturating_sub(3)).collect();
                target.push_str("...");
            }

            let op_target = if target.is_empty() {
                color.paint(e.operation.as_str()).to_string()
            } else {
                format!("{} ({})", color.paint(e.operation.as_str()), target)
            };

            let width = visible_len(ansi.as_ref(), &op_target);
            let padding = " ".repeat(MAX_OP_WIDTH.saturating_sub(width));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_len_ignores_color_codes() {
        let ansi = ansi_codes();
        let painted = format!("{} (DSA-PPC-F1)", Colour::Green.paint("add"));
        assert_eq!(visible_len(ansi.as_ref(), &painted), 16);
        assert_eq!(visible_len(ansi.as_ref(), "plain"), 5);
        assert_eq!(visible_len(None, "plain"), 5);
    }
}
