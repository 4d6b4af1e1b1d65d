//! VEVENT extraction.
//!
//! Walks logical lines with a two-state machine: outside any event, or inside
//! a `VEVENT` with an accumulator of the properties seen so far. Each
//! `END:VEVENT` turns the accumulator into an [`EventRecord`].

use tracing::{debug, trace};

use crate::event::{EventFields, EventRecord, EventSource, make_event_record};

use super::lines::unfold;
use super::timestamp::normalize_timestamp;

/// Parses ICS text into event records, in source order.
///
/// Never fails: malformed lines are skipped, unparseable timestamps become
/// `None`, and an event left open at end of input is dropped.
pub fn parse(text: &str) -> Vec<EventRecord> {
    parse_lines(unfold(text))
}

/// Parses already unfolded lines into event records.
pub fn parse_lines<I>(lines: I) -> Vec<EventRecord>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut events = Vec::new();
    let mut state = ParserState::Outside;

    for line in lines {
        state = state.advance(line.as_ref(), &mut events);
    }

    if let ParserState::InEvent { fields, .. } = state {
        debug!(uid = ?fields.id, "Discarding VEVENT without END:VEVENT");
    }

    debug!(count = events.len(), "Parsed events from ICS");
    events
}

enum ParserState {
    Outside,
    InEvent {
        fields: EventFields,
        /// Depth of sub-components (VALARM, …) currently open.
        nested: usize,
    },
}

impl ParserState {
    fn fresh_event() -> Self {
        Self::InEvent {
            fields: EventFields::new(),
            nested: 0,
        }
    }

    fn advance(self, line: &str, events: &mut Vec<EventRecord>) -> Self {
        let property = Property::parse(line);

        match self {
            Self::Outside => match property {
                Some(p) if p.is_begin("VEVENT") => Self::fresh_event(),
                _ => Self::Outside,
            },
            Self::InEvent { mut fields, nested } => {
                let Some(p) = property else {
                    trace!(line, "Skipping line without colon");
                    return Self::InEvent { fields, nested };
                };

                if p.is_begin("VEVENT") {
                    debug!(uid = ?fields.id, "Discarding VEVENT interrupted by BEGIN:VEVENT");
                    return Self::fresh_event();
                }
                if p.is_marker("BEGIN") {
                    return Self::InEvent {
                        fields,
                        nested: nested + 1,
                    };
                }
                if p.is_end("VEVENT") {
                    if nested > 0 {
                        debug!(uid = ?fields.id, nested, "Closing VEVENT with open sub-components");
                    }
                    fields.source = Some(EventSource::Imported);
                    events.push(make_event_record(fields));
                    return Self::Outside;
                }
                if nested > 0 {
                    let nested = if p.is_marker("END") { nested - 1 } else { nested };
                    return Self::InEvent { fields, nested };
                }

                p.apply(&mut fields);
                Self::InEvent { fields, nested }
            }
        }
    }
}

/// A content line split into `NAME[;PARAMS]:VALUE`.
#[derive(Debug, PartialEq, Eq)]
struct Property<'a> {
    name: &'a str,
    params: &'a str,
    value: &'a str,
}

impl<'a> Property<'a> {
    /// Splits on the first colon; returns `None` if there is none.
    fn parse(line: &'a str) -> Option<Self> {
        let (head, value) = line.split_once(':')?;
        let (name, params) = head.split_once(';').unwrap_or((head, ""));
        Some(Self {
            name: name.trim(),
            params,
            value: value.trim(),
        })
    }

    fn is_marker(&self, marker: &str) -> bool {
        self.name.eq_ignore_ascii_case(marker)
    }

    fn is_begin(&self, component: &str) -> bool {
        self.is_marker("BEGIN") && self.value.eq_ignore_ascii_case(component)
    }

    fn is_end(&self, component: &str) -> bool {
        self.is_marker("END") && self.value.eq_ignore_ascii_case(component)
    }

    /// Stores this property in the accumulator if it is one we keep.
    fn apply(&self, fields: &mut EventFields) {
        match self.name.to_ascii_uppercase().as_str() {
            "UID" => fields.id = Some(self.value.to_string()),
            "SUMMARY" => fields.title = Some(self.value.to_string()),
            "DESCRIPTION" => fields.description = Some(self.value.to_string()),
            "LOCATION" => fields.location = Some(self.value.to_string()),
            "DTSTART" => fields.start = self.timestamp(),
            "DTEND" => fields.end = self.timestamp(),
            "RRULE" => fields.rrule = Some(self.value.to_string()),
            _ => {}
        }
    }

    fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        normalize_timestamp(self.params, self.value)
            .inspect_err(|err| {
                debug!(
                    property = self.name,
                    value = self.value,
                    reason = err.reason(),
                    "Unparseable timestamp"
                );
            })
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//Test//EN\r\n{body}END:VCALENDAR\r\n"
        )
    }

    fn sample_ics() -> String {
        wrap(
            "BEGIN:VEVENT\r\n\
             UID:test-event-1@example.com\r\n\
             DTSTART:20250415T130000Z\r\n\
             DTEND:20250415T140000Z\r\n\
             SUMMARY:Team Meeting\r\n\
             DESCRIPTION:Weekly sync meeting\r\n\
             LOCATION:Conference Room A\r\n\
             STATUS:CONFIRMED\r\n\
             END:VEVENT\r\n",
        )
    }

    mod property_lines {
        use super::*;

        #[test]
        fn splits_name_params_value() {
            assert_eq!(
                Property::parse("DTSTART;TZID=Europe/Paris:20250415T090000"),
                Some(Property {
                    name: "DTSTART",
                    params: "TZID=Europe/Paris",
                    value: "20250415T090000",
                })
            );
        }

        #[test]
        fn splits_on_first_colon_only() {
            let p = Property::parse("DESCRIPTION:Join: https://example.com/x ").unwrap();
            assert_eq!(p.name, "DESCRIPTION");
            assert_eq!(p.value, "Join: https://example.com/x");
        }

        #[test]
        fn line_without_colon() {
            assert_eq!(Property::parse("garbage"), None);
        }
    }

    mod extraction {
        use super::*;

        #[test]
        fn parses_basic_event() {
            let events = parse(&sample_ics());

            assert_eq!(events.len(), 1);
            let event = &events[0];
            assert_eq!(event.id, "test-event-1@example.com");
            assert_eq!(event.title, "Team Meeting");
            assert_eq!(event.description, "Weekly sync meeting");
            assert_eq!(event.location, "Conference Room A");
            assert_eq!(event.start_iso().as_deref(), Some("2025-04-15T13:00:00.000Z"));
            assert_eq!(event.end_iso().as_deref(), Some("2025-04-15T14:00:00.000Z"));
            assert_eq!(event.source, EventSource::Imported);
            assert_eq!(event.rrule, None);
        }

        #[test]
        fn parses_all_day_event() {
            let events = parse(&wrap(
                "BEGIN:VEVENT\r\n\
                 UID:all-day-1@example.com\r\n\
                 DTSTART;VALUE=DATE:20250415\r\n\
                 DTEND;VALUE=DATE:20250416\r\n\
                 SUMMARY:Company Holiday\r\n\
                 END:VEVENT\r\n",
            ));

            assert_eq!(events[0].start_iso().as_deref(), Some("2025-04-15T00:00:00.000Z"));
            assert_eq!(events[0].end_iso().as_deref(), Some("2025-04-16T00:00:00.000Z"));
        }

        #[test]
        fn unfolds_long_summary() {
            let events = parse("BEGIN:VEVENT\nSUMMARY:Long Ti\n tle\nEND:VEVENT\n");
            assert_eq!(events[0].title, "Long Title");
        }

        #[test]
        fn keeps_rrule_verbatim() {
            let events = parse(&wrap(
                "BEGIN:VEVENT\r\n\
                 UID:weekly\r\n\
                 RRULE:FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250601T000000Z\r\n\
                 END:VEVENT\r\n",
            ));
            assert_eq!(
                events[0].rrule.as_deref(),
                Some("FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250601T000000Z")
            );
        }

        #[test]
        fn missing_fields_get_defaults() {
            let events = parse("BEGIN:VEVENT\r\nDTSTART:20250415T130000Z\r\nEND:VEVENT\r\n");

            let event = &events[0];
            assert!(!event.id.is_empty());
            assert!(event.has_generated_id());
            assert_eq!(event.title, "Untitled Event");
            assert_eq!(event.location, "");
            assert_eq!(event.description, "");
            assert_eq!(event.end, None);
        }

        #[test]
        fn unparseable_timestamp_becomes_none() {
            let events = parse(
                "BEGIN:VEVENT\nUID:x\nDTSTART:tomorrow\nDTEND:20250415T140000Z\nEND:VEVENT\n",
            );
            assert_eq!(events[0].start, None);
            assert!(events[0].end.is_some());
        }

        #[test]
        fn zoned_start_pins_wall_clock_as_utc() {
            let events = parse(
                "BEGIN:VEVENT\nUID:x\nDTSTART;TZID=America/Chicago:20250415T080000\nEND:VEVENT\n",
            );
            assert_eq!(events[0].start_iso().as_deref(), Some("2025-04-15T08:00:00.000Z"));
        }

        #[test]
        fn repeated_property_overwrites() {
            let events = parse("BEGIN:VEVENT\nSUMMARY:first\nSUMMARY:second\nEND:VEVENT\n");
            assert_eq!(events[0].title, "second");
        }

        #[test]
        fn ignores_unknown_and_malformed_lines() {
            let events = parse(
                "BEGIN:VEVENT\nUID:x\nX-CUSTOM;FOO=bar:baz\nthis line has no colon\nEND:VEVENT\n",
            );
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, "x");
        }

        #[test]
        fn markers_are_case_insensitive() {
            let events = parse("begin:vevent\nuid:lower\nsummary:Quiet\nend:vevent\n");
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, "lower");
            assert_eq!(events[0].title, "Quiet");
        }
    }

    mod structure {
        use super::*;

        #[test]
        fn preserves_source_order() {
            let body: String = ["c", "a", "b"]
                .iter()
                .map(|uid| {
                    format!("BEGIN:VEVENT\r\nUID:{uid}\r\nDTSTART:2025041{}\r\nEND:VEVENT\r\n", uid.len())
                })
                .collect();
            let ids: Vec<_> = parse(&wrap(&body)).into_iter().map(|e| e.id).collect();
            assert_eq!(ids, vec!["c", "a", "b"]);
        }

        #[test]
        fn unterminated_event_is_dropped() {
            let events = parse(&format!(
                "{}BEGIN:VEVENT\r\nUID:truncated\r\nSUMMARY:Never closed\r\n",
                "BEGIN:VEVENT\r\nUID:complete\r\nEND:VEVENT\r\n"
            ));
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, "complete");
        }

        #[test]
        fn begin_inside_event_restarts_accumulator() {
            let events = parse(
                "BEGIN:VEVENT\nUID:lost\nSUMMARY:Lost\nBEGIN:VEVENT\nUID:kept\nEND:VEVENT\n",
            );
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, "kept");
            assert_eq!(events[0].title, "Untitled Event");
        }

        #[test]
        fn alarm_properties_do_not_leak_into_event() {
            let events = parse(&wrap(
                "BEGIN:VEVENT\r\n\
                 UID:with-alarm\r\n\
                 DESCRIPTION:The real description\r\n\
                 BEGIN:VALARM\r\n\
                 ACTION:DISPLAY\r\n\
                 DESCRIPTION:Reminder\r\n\
                 END:VALARM\r\n\
                 LOCATION:Room 1\r\n\
                 END:VEVENT\r\n",
            ));
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].description, "The real description");
            assert_eq!(events[0].location, "Room 1");
        }

        #[test]
        fn end_vevent_closes_event_with_unclosed_alarm() {
            let events = parse(
                "BEGIN:VEVENT\nUID:a\nBEGIN:VALARM\nACTION:DISPLAY\nEND:VEVENT\n\
                 BEGIN:VEVENT\nUID:b\nEND:VEVENT\n",
            );
            let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        }

        #[test]
        fn unclosed_alarm_properties_still_skipped() {
            let events = parse(&wrap(
                "BEGIN:VEVENT\r\n\
                 UID:open-alarm\r\n\
                 SUMMARY:Exam\r\n\
                 BEGIN:VALARM\r\n\
                 SUMMARY:Reminder\r\n\
                 END:VEVENT\r\n",
            ));
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].title, "Exam");
        }

        #[test]
        fn other_components_are_ignored() {
            let events = parse(&wrap(
                "BEGIN:VTODO\r\nUID:todo\r\nSUMMARY:Chore\r\nEND:VTODO\r\n\
                 BEGIN:VTIMEZONE\r\nTZID:Europe/Paris\r\nEND:VTIMEZONE\r\n",
            ));
            assert!(events.is_empty());
        }

        #[test]
        fn garbage_input_yields_nothing() {
            assert!(parse("").is_empty());
            assert!(parse("\u{0}\u{1}binary\u{7f}garbage\nwithout any events").is_empty());
        }

        #[test]
        fn parse_is_idempotent_apart_from_generated_ids() {
            let text = format!(
                "{}BEGIN:VEVENT\r\nSUMMARY:No uid\r\nEND:VEVENT\r\n",
                sample_ics()
            );
            let first = parse(&text);
            let second = parse(&text);

            assert_eq!(first[0], second[0]);
            assert_eq!(first[1].title, second[1].title);
            assert_eq!(first[1].start, second[1].start);
            assert!(first[1].has_generated_id() && second[1].has_generated_id());
        }

        #[test]
        fn parse_lines_accepts_prepared_lines() {
            let lines = vec!["BEGIN:VEVENT", "UID:pre", "END:VEVENT"];
            let events = parse_lines(lines);
            assert_eq!(events[0].id, "pre");
        }
    }
}
