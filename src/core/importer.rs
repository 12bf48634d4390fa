use crate::core::ski_area::SkiArea;
use crate::domain::model::ImportReport;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SkiAreaError};

const FIELD_SEPARATOR: char = ';';
const LIFT_TYPE_RECORD: &str = "T";
const LIFT_RECORD: &str = "L";

/// Loads lift types and lifts from `;`-separated text:
///
/// ```text
/// T;<code>;<category>;<capacity>
/// L;<lift name>;<type code>
/// ```
///
/// Lines of the wrong shape are skipped. Any other failure stops the import
/// and leaves the lines already applied in place.
pub struct Importer<S: Storage> {
    storage: S,
}

impl<S: Storage> Importer<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn import(&self, area: &mut SkiArea, path: &str) -> Result<ImportReport> {
        tracing::debug!("Reading lift descriptions from {}", path);
        let content = self.storage.read_to_string(path)?;
        let report = import_str(area, &content)?;

        tracing::info!(
            "Imported {} lift types and {} lifts from {} ({} of {} lines skipped)",
            report.types_defined,
            report.lifts_created,
            path,
            report.lines_skipped,
            report.lines_read
        );
        Ok(report)
    }
}

/// Applies every record in `content` to `area`, in line order.
pub fn import_str(area: &mut SkiArea, content: &str) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        report.lines_read += 1;

        let fields = split_fields(line);
        match (fields[0].trim(), fields.len()) {
            (LIFT_TYPE_RECORD, len) if len >= 4 => {
                let capacity = parse_capacity(line_number, fields[3])?;
                area.define_lift_type(fields[1].trim(), fields[2].trim(), capacity)?;
                report.types_defined += 1;
            }
            (LIFT_RECORD, len) if len >= 3 => {
                area.create_lift(fields[1].trim(), fields[2].trim())?;
                report.lifts_created += 1;
            }
            _ => {
                tracing::debug!("Skipping line {}: {:?}", line_number, line);
                report.lines_skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Splits a line on `;`, dropping trailing empty fields. Always returns at
/// least one field.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.len() > 1 && fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_capacity(line: usize, raw: &str) -> Result<i32> {
    let value = raw.trim();
    value.parse::<i32>().map_err(|_| SkiAreaError::ParseError {
        line,
        field: "capacity".to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_drops_trailing_empties() {
        assert_eq!(split_fields("L;Lift1;C1"), vec!["L", "Lift1", "C1"]);
        assert_eq!(split_fields("L;Lift1;;"), vec!["L", "Lift1"]);
        assert_eq!(split_fields("L;;C1"), vec!["L", "", "C1"]);
        assert_eq!(split_fields(""), vec![""]);
        assert_eq!(split_fields(";;"), vec![""]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut area = SkiArea::new("Sestriere");
        let report = import_str(&mut area, " T ; C1 ;  Chair ; 4 \nL ;  Lift One ; C1").unwrap();

        assert_eq!(report.types_defined, 1);
        assert_eq!(report.lifts_created, 1);
        assert_eq!(area.category("C1").unwrap(), "Chair");
        assert_eq!(area.capacity("C1").unwrap(), 4);
        assert_eq!(area.type_of("Lift One").unwrap(), "C1");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let mut area = SkiArea::new("Sestriere");
        let content = "T;C1;Chair;4\nL;Lift1;C1\nX;garbage;line\nT;Bad;OnlyThreeFields\nL;Lift2;C1";
        let report = import_str(&mut area, content).unwrap();

        assert_eq!(
            report,
            ImportReport {
                lines_read: 5,
                types_defined: 1,
                lifts_created: 2,
                lines_skipped: 2,
            }
        );
        assert_eq!(area.lift_type_codes(), vec!["C1"]);
        assert_eq!(area.lift_names(), vec!["Lift1", "Lift2"]);
    }

    #[test]
    fn test_blank_and_short_lines_are_skipped() {
        let mut area = SkiArea::new("Sestriere");
        let report = import_str(&mut area, "\nT;C1;Chair;4\n\nL;Lift1\nL;Lift2;\nT\n").unwrap();

        assert_eq!(report.lines_skipped, 5);
        assert!(area.lift_names().is_empty());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut area = SkiArea::new("Sestriere");
        import_str(&mut area, "T;C1;Chair;4;extra\nL;Lift1;C1;extra").unwrap();

        assert_eq!(area.capacity("C1").unwrap(), 4);
        assert_eq!(area.type_of("Lift1").unwrap(), "C1");
    }

    #[test]
    fn test_bad_capacity_aborts_after_applied_lines() {
        let mut area = SkiArea::new("Sestriere");
        let content = "T;C1;Chair;4\nL;Lift1;C1\nT;C2;Chair;abc\nL;Lift2;C1";
        let err = import_str(&mut area, content).unwrap_err();

        match err {
            SkiAreaError::ParseError { line, field, value } => {
                assert_eq!(line, 3);
                assert_eq!(field, "capacity");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(area.lift_names(), vec!["Lift1"]);
        assert_eq!(area.lift_type_codes(), vec!["C1"]);
    }

    #[test]
    fn test_registry_failures_abort_import() {
        let mut area = SkiArea::new("Sestriere");
        let err = import_str(&mut area, "T;C1;Chair;4\nT;C1;Chair;6\nL;Lift1;C1").unwrap_err();
        assert!(matches!(err, SkiAreaError::InvalidLiftType { .. }));
        assert!(area.lift_names().is_empty());

        let mut area = SkiArea::new("Sestriere");
        let err = import_str(&mut area, "T;C0;Chair;0").unwrap_err();
        assert!(matches!(err, SkiAreaError::InvalidLiftType { .. }));

        let mut area = SkiArea::new("Sestriere");
        let err = import_str(&mut area, "L;Lift1;C9").unwrap_err();
        assert!(matches!(err, SkiAreaError::UnknownLiftType { .. }));
    }
}
