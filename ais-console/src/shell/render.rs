use std::fmt::{self, Display, Formatter, Write};

use crate::entity::descriptor::InputKind;
use crate::entity::view::{ActionSurface, Body, Cell, Control, FormView, ListView};
use crate::services::overview::SensorOverview;

fn badge(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Badge { positive: true, label } => format!("[+] {label}"),
        Cell::Badge { positive: false, label } => format!("[-] {label}"),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(f: &mut Formatter<'_>, text: &str, to: usize) -> fmt::Result {
    f.write_str(text)?;
    for _ in width(text)..to {
        f.write_char(' ')?;
    }
    Ok(())
}

fn control(name: &str, control: Control) -> String {
    match control {
        Control::Enabled => name.to_string(),
        Control::Disabled => format!("{name} (unavailable)"),
    }
}

impl Display for ActionSurface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut actions = vec![control("refresh", self.refresh)];
        if let Some(create) = self.create {
            actions.push(control("create", create));
        }
        actions.push(control("edit", self.edit));
        actions.push(control("delete", self.delete));
        write!(f, "Actions: {}", actions.join(", "))
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        if let Some(filter) = &self.filter {
            let input = if filter.input.is_empty() { "<empty>" } else { &filter.input };
            writeln!(f, "Filter ({}): {input}", filter.label)?;
        }
        if let Some(banner) = &self.banner {
            writeln!(f, "{banner}")?;
        }

        match &self.body {
            Body::Loading => writeln!(f, "Loading...")?,
            Body::Empty(message) => writeln!(f, "{message}")?,
            Body::Rows(rows) => {
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        std::iter::once((i + 1).to_string())
                            .chain(row.iter().map(badge))
                            .collect()
                    })
                    .collect();
                let headers: Vec<&str> = std::iter::once("#")
                    .chain(self.headers.iter().map(String::as_str))
                    .collect();

                let widths: Vec<usize> = headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        rows.iter()
                            .map(|row| row.get(i).map_or(0, |cell| width(cell)))
                            .fold(width(header), usize::max)
                    })
                    .collect();

                for (i, header) in headers.iter().enumerate() {
                    pad(f, header, widths[i] + 2)?;
                }
                writeln!(f)?;
                for row in &rows {
                    for (i, cell) in row.iter().enumerate() {
                        pad(f, cell, widths[i] + 2)?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "Records shown: {}", self.count)?;
            }
        }

        write!(f, "{}", self.actions)
    }
}

impl Display for FormView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {} --", self.title)?;
        if let Some(message) = self.message {
            writeln!(f, "{message}")?;
        }

        for field in &self.fields {
            let marker = if field.required { "*" } else { " " };
            let value = match field.input {
                InputKind::Password if !field.value.is_empty() => "********".to_string(),
                _ if field.value.is_empty() => "<empty>".to_string(),
                _ => field.value.clone(),
            };
            write!(f, "{marker} {} ({}): {value}", field.label, field.name)?;
            if field.disabled {
                write!(f, " [locked]")?;
            }
            if !field.options.is_empty() {
                let options: Vec<_> = field
                    .options
                    .iter()
                    .map(|o| if o.label == o.value { o.value.to_string() } else { format!("{}={}", o.value, o.label) })
                    .collect();
                write!(f, " options: {}", options.join(" | "))?;
            }
            writeln!(f)?;
        }

        if self.submitting {
            write!(f, "Submitting...")
        } else {
            write!(f, "Type `submit` to confirm or `cancel` to close.")
        }
    }
}

impl Display for SensorOverview {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Sensor {} ==", self.sensor_id)?;
        if let Some(sensor) = &self.sensor {
            let state = if sensor.active { "active" } else { "inactive" };
            writeln!(f, "Room {}, {}, {state}", sensor.room_id, sensor.sensor_type)?;
        }
        if let Some(limitation) = &self.limitation {
            writeln!(f, "Limits: min {} / max {}", limitation.min, limitation.max)?;
        }

        if self.indications.is_empty() {
            return write!(f, "No indications for this sensor.");
        }

        for indication in &self.indications {
            writeln!(f, "{}  {:>8}  {}", indication.time, indication.value, indication.status)?;
        }
        write!(f, "Records shown: {}", self.indications.len())
    }
}
