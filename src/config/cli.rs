use crate::domain::model::TimeUnit;
use crate::domain::ports::{Render, RenderSink};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
struct Frame {
    fields: BTreeMap<&'static str, String>,
    complete: Option<String>,
}

/// CLI 的終端機輸出：每個 tick 一行，包含該次輸出的所有標籤
pub struct TerminalSink<W: Write + Send> {
    out: W,
    format: OutputFormat,
    frame: Vec<(String, Frame)>,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            frame: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame_for(&mut self, label: &str) -> &mut Frame {
        let index = match self.frame.iter().position(|(l, _)| l == label) {
            Some(index) => index,
            None => {
                self.frame.push((label.to_string(), Frame::default()));
                self.frame.len() - 1
            }
        };
        &mut self.frame[index].1
    }

    fn text_line(&self) -> String {
        self.frame
            .iter()
            .map(|(label, frame)| match &frame.complete {
                Some(message) => format!("{}: {}", label, message),
                None => {
                    let parts: Vec<String> = TimeUnit::ALL
                        .iter()
                        .filter_map(|unit| {
                            frame
                                .fields
                                .get(unit.suffix())
                                .map(|value| format!("{}{}", value, &unit.suffix()[..1]))
                        })
                        .collect();
                    format!("{}: {}", label, parts.join(" "))
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn json_line(&self) -> serde_json::Result<String> {
        let mut root = Map::new();
        for (label, frame) in &self.frame {
            let mut entry = Map::new();
            match &frame.complete {
                Some(message) => {
                    entry.insert("complete".to_string(), Value::String(message.clone()));
                }
                None => {
                    for (unit, value) in &frame.fields {
                        entry.insert(unit.to_string(), Value::String(value.clone()));
                    }
                }
            }
            root.insert(label.clone(), Value::Object(entry));
        }
        serde_json::to_string(&Value::Object(root))
    }
}

fn split_field_key(key: &str) -> Option<(&str, &'static str)> {
    let (label, suffix) = key.rsplit_once('-')?;
    let unit = TimeUnit::ALL.into_iter().find(|unit| unit.suffix() == suffix)?;
    if label.is_empty() {
        return None;
    }
    Some((label, unit.suffix()))
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn write_field(&mut self, key: &str, text: &str) -> Render {
        match split_field_key(key) {
            Some((label, unit)) => {
                self.frame_for(label).fields.insert(unit, text.to_string());
                Render::Written
            }
            None => Render::Missing,
        }
    }

    fn write_complete(&mut self, label: &str, message: &str) -> Render {
        let frame = self.frame_for(label);
        frame.fields.clear();
        frame.complete = Some(message.to_string());
        Render::Written
    }

    fn end_tick(&mut self) {
        if self.frame.is_empty() {
            return;
        }

        let line = match self.format {
            OutputFormat::Text => Ok(self.text_line()),
            OutputFormat::Json => self.json_line(),
        };

        match line {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
                    tracing::warn!("Failed to write countdown output: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to format countdown output: {}", e),
        }

        self.frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CountdownLabel, Remaining};

    fn output(sink: &TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_split_field_key() {
        assert_eq!(split_field_key("primary-days"), Some(("primary", "days")));
        assert_eq!(split_field_key("run-off-seconds"), Some(("run-off", "seconds")));
        assert_eq!(split_field_key("primary-weeks"), None);
        assert_eq!(split_field_key("-days"), None);
        assert_eq!(split_field_key("primary"), None);
    }

    #[test]
    fn test_text_line_per_tick() {
        let mut sink = TerminalSink::new(Vec::new(), OutputFormat::Text);
        sink.render_remaining(
            &CountdownLabel::from("primary"),
            &Remaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0,
            },
        );
        sink.write_complete("general", "Election Complete");
        sink.end_tick();

        assert_eq!(
            output(&sink),
            "primary: 00d 01h 00m 00s | general: Election Complete\n"
        );
    }

    #[test]
    fn test_json_line_per_tick() {
        let mut sink = TerminalSink::new(Vec::new(), OutputFormat::Json);
        sink.render_remaining(
            &CountdownLabel::from("primary"),
            &Remaining {
                days: 200,
                hours: 3,
                minutes: 4,
                seconds: 5,
            },
        );
        sink.end_tick();

        let value: Value = serde_json::from_str(output(&sink).trim()).unwrap();
        assert_eq!(value["primary"]["days"], "200");
        assert_eq!(value["primary"]["hours"], "03");
        assert_eq!(value["primary"]["minutes"], "04");
        assert_eq!(value["primary"]["seconds"], "05");
    }

    #[test]
    fn test_empty_tick_prints_nothing() {
        let mut sink = TerminalSink::new(Vec::new(), OutputFormat::Text);
        sink.end_tick();
        assert!(output(&sink).is_empty());
    }
}
