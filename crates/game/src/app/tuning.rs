use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use roxmltree::{Document, Node};

pub(crate) const TUNING_FILE_NAME: &str = "tuning.xml";

/// Every tunable gameplay constant, with the stock arcade values as defaults.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameTuning {
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) target_fps: u32,
    pub(crate) ground_y: i32,
    pub(crate) gravity: f32,
    pub(crate) jump_speed: f32,
    pub(crate) player_x: i32,
    pub(crate) obstacle_speed: i32,
    pub(crate) spawn_interval_ms: u64,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            window_width: 900,
            window_height: 400,
            target_fps: 30,
            ground_y: 235,
            gravity: 1.5,
            jump_speed: -20.0,
            player_x: 100,
            obstacle_speed: 8,
            spawn_interval_ms: 2000,
        }
    }
}

impl GameTuning {
    pub(crate) fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub(crate) fn visible_width(&self) -> i32 {
        self.window_width as i32
    }

    pub(crate) fn visible_height(&self) -> i32 {
        self.window_height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLocation {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuningErrorCode {
    ReadFile,
    XmlMalformed,
    InvalidRoot,
    UnknownField,
    DuplicateField,
    EmptyValue,
    InvalidValue,
    OutOfRange,
}

#[derive(Debug, Clone)]
pub(crate) struct TuningError {
    pub(crate) code: TuningErrorCode,
    pub(crate) message: String,
    pub(crate) file_path: PathBuf,
    pub(crate) location: Option<SourceLocation>,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "{:?}: {} (file={}, line={}, column={})",
                self.code,
                self.message,
                self.file_path.display(),
                loc.line,
                loc.column
            ),
            None => write!(
                f,
                "{:?}: {} (file={})",
                self.code,
                self.message,
                self.file_path.display()
            ),
        }
    }
}

impl std::error::Error for TuningError {}

/// Reads `<assets>/tuning.xml`. A missing file yields the defaults.
pub(crate) fn load_tuning(assets_dir: &Path) -> Result<GameTuning, TuningError> {
    let file_path = assets_dir.join(TUNING_FILE_NAME);
    let raw = match fs::read_to_string(&file_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(GameTuning::default());
        }
        Err(error) => {
            return Err(TuningError {
                code: TuningErrorCode::ReadFile,
                message: format!("failed to read tuning file: {error}"),
                file_path,
                location: None,
            });
        }
    };
    parse_tuning(&file_path, &raw)
}

pub(crate) fn parse_tuning(file_path: &Path, raw: &str) -> Result<GameTuning, TuningError> {
    let doc = Document::parse(raw).map_err(|error| TuningError {
        code: TuningErrorCode::XmlMalformed,
        message: format!("malformed XML: {error}"),
        file_path: file_path.to_path_buf(),
        location: Some(SourceLocation {
            line: error.pos().row as usize,
            column: error.pos().col as usize,
        }),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "Tuning" {
        return Err(error_at_node(
            TuningErrorCode::InvalidRoot,
            "root element must be <Tuning>".to_string(),
            file_path,
            &doc,
            root,
        ));
    }

    let fields = FieldReader {
        file_path,
        doc: &doc,
    };
    let mut tuning = GameTuning::default();
    let mut seen_fields = HashSet::<String>::new();
    let mut ground_node = None;
    let mut player_x_node = None;

    for field in root.children().filter(|child| child.is_element()) {
        let field_name = field.tag_name().name().to_string();
        if !seen_fields.insert(field_name.clone()) {
            return Err(error_at_node(
                TuningErrorCode::DuplicateField,
                format!("duplicate field <{field_name}> in <Tuning>"),
                file_path,
                &doc,
                field,
            ));
        }

        match field_name.as_str() {
            "windowWidth" => tuning.window_width = fields.ranged(field, "windowWidth", 64..=4096)?,
            "windowHeight" => {
                tuning.window_height = fields.ranged(field, "windowHeight", 64..=4096)?
            }
            "targetFps" => tuning.target_fps = fields.ranged(field, "targetFps", 1..=240)?,
            "groundY" => {
                tuning.ground_y = fields.parse(field, "groundY")?;
                ground_node = Some(field);
            }
            "gravity" => {
                tuning.gravity = fields.parse(field, "gravity")?;
                if !tuning.gravity.is_finite() || tuning.gravity <= 0.0 {
                    return Err(fields.out_of_range(field, "gravity must be finite and > 0"));
                }
            }
            "jumpSpeed" => {
                tuning.jump_speed = fields.parse(field, "jumpSpeed")?;
                if !tuning.jump_speed.is_finite() || tuning.jump_speed >= 0.0 {
                    return Err(fields.out_of_range(field, "jumpSpeed must be finite and < 0"));
                }
            }
            "playerX" => {
                tuning.player_x = fields.parse(field, "playerX")?;
                player_x_node = Some(field);
            }
            "obstacleSpeed" => {
                tuning.obstacle_speed = fields.ranged(field, "obstacleSpeed", 1..=200)?
            }
            "spawnIntervalMs" => {
                tuning.spawn_interval_ms = fields.ranged(field, "spawnIntervalMs", 1..=600_000)?
            }
            _ => {
                return Err(error_at_node(
                    TuningErrorCode::UnknownField,
                    format!("unknown field <{field_name}> in <Tuning>"),
                    file_path,
                    &doc,
                    field,
                ))
            }
        }
    }

    // Cross-field bounds are checked once the window size is final.
    if !(1..=tuning.visible_height()).contains(&tuning.ground_y) {
        return Err(fields.out_of_range(
            ground_node.unwrap_or(root),
            &format!("groundY must be within 1..={}", tuning.window_height),
        ));
    }
    if !(0..tuning.visible_width()).contains(&tuning.player_x) {
        return Err(fields.out_of_range(
            player_x_node.unwrap_or(root),
            &format!("playerX must be within 0..{}", tuning.window_width),
        ));
    }

    Ok(tuning)
}

struct FieldReader<'a, 'input> {
    file_path: &'a Path,
    doc: &'a Document<'input>,
}

impl FieldReader<'_, '_> {
    fn required_text(&self, node: Node<'_, '_>, field_name: &str) -> Result<String, TuningError> {
        let value = node.text().map(str::trim).unwrap_or_default().to_string();
        if value.is_empty() {
            return Err(error_at_node(
                TuningErrorCode::EmptyValue,
                format!("field <{field_name}> must not be empty"),
                self.file_path,
                self.doc,
                node,
            ));
        }
        Ok(value)
    }

    fn parse<T: FromStr>(&self, node: Node<'_, '_>, field_name: &str) -> Result<T, TuningError> {
        let value = self.required_text(node, field_name)?;
        value.parse::<T>().map_err(|_| {
            error_at_node(
                TuningErrorCode::InvalidValue,
                format!("{field_name} '{value}' is not a valid number"),
                self.file_path,
                self.doc,
                node,
            )
        })
    }

    fn ranged<T>(
        &self,
        node: Node<'_, '_>,
        field_name: &str,
        range: std::ops::RangeInclusive<T>,
    ) -> Result<T, TuningError>
    where
        T: FromStr + PartialOrd + fmt::Display,
    {
        let parsed = self.parse::<T>(node, field_name)?;
        if !range.contains(&parsed) {
            return Err(self.out_of_range(
                node,
                &format!(
                    "{field_name} must be within {}..={}",
                    range.start(),
                    range.end()
                ),
            ));
        }
        Ok(parsed)
    }

    fn out_of_range(&self, node: Node<'_, '_>, message: &str) -> TuningError {
        error_at_node(
            TuningErrorCode::OutOfRange,
            message.to_string(),
            self.file_path,
            self.doc,
            node,
        )
    }
}

fn error_at_node(
    code: TuningErrorCode,
    message: String,
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> TuningError {
    let pos = doc.text_pos_at(node.range().start);
    TuningError {
        code,
        message,
        file_path: file_path.to_path_buf(),
        location: Some(SourceLocation {
            line: pos.row as usize,
            column: pos.col as usize,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(raw: &str) -> Result<GameTuning, TuningError> {
        parse_tuning(Path::new("assets/tuning.xml"), raw)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp");
        let tuning = load_tuning(temp.path()).expect("defaults");
        assert_eq!(tuning, GameTuning::default());
    }

    #[test]
    fn defaults_match_arcade_constants() {
        let tuning = GameTuning::default();
        assert_eq!((tuning.window_width, tuning.window_height), (900, 400));
        assert_eq!(tuning.target_fps, 30);
        assert_eq!(tuning.ground_y, 235);
        assert_eq!(tuning.gravity, 1.5);
        assert_eq!(tuning.jump_speed, -20.0);
        assert_eq!(tuning.player_x, 100);
        assert_eq!(tuning.obstacle_speed, 8);
        assert_eq!(tuning.spawn_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn file_overrides_only_named_fields() {
        let temp = TempDir::new().expect("temp");
        fs::write(
            temp.path().join(TUNING_FILE_NAME),
            r#"<Tuning>
                <gravity>2.0</gravity>
                <spawnIntervalMs>1500</spawnIntervalMs>
            </Tuning>"#,
        )
        .expect("write");

        let tuning = load_tuning(temp.path()).expect("tuning");
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.spawn_interval_ms, 1500);
        assert_eq!(tuning.ground_y, 235);
    }

    #[test]
    fn wrong_root_is_rejected_with_location() {
        let err = parse("<Defs><gravity>1</gravity></Defs>").expect_err("err");
        assert_eq!(err.code, TuningErrorCode::InvalidRoot);
        assert_eq!(err.location, Some(SourceLocation { line: 1, column: 1 }));
    }

    #[test]
    fn unknown_field_errors() {
        let err = parse("<Tuning><mood>Happy</mood></Tuning>").expect_err("err");
        assert_eq!(err.code, TuningErrorCode::UnknownField);
    }

    #[test]
    fn duplicate_field_errors() {
        let err = parse("<Tuning><gravity>1</gravity><gravity>2</gravity></Tuning>")
            .expect_err("err");
        assert_eq!(err.code, TuningErrorCode::DuplicateField);
    }

    #[test]
    fn empty_and_unparsable_values_error() {
        let empty = parse("<Tuning><targetFps> </targetFps></Tuning>").expect_err("err");
        assert_eq!(empty.code, TuningErrorCode::EmptyValue);

        let bad = parse("<Tuning><targetFps>fast</targetFps></Tuning>").expect_err("err");
        assert_eq!(bad.code, TuningErrorCode::InvalidValue);
        assert!(bad.to_string().contains("targetFps 'fast'"));
    }

    #[test]
    fn out_of_range_values_error() {
        let fps = parse("<Tuning><targetFps>0</targetFps></Tuning>").expect_err("err");
        assert_eq!(fps.code, TuningErrorCode::OutOfRange);

        let jump = parse("<Tuning><jumpSpeed>5</jumpSpeed></Tuning>").expect_err("err");
        assert_eq!(jump.code, TuningErrorCode::OutOfRange);

        let ground = parse("<Tuning><windowHeight>200</windowHeight><groundY>235</groundY></Tuning>")
            .expect_err("err");
        assert_eq!(ground.code, TuningErrorCode::OutOfRange);
        assert_eq!(ground.location.map(|loc| loc.line), Some(1));
    }

    #[test]
    fn shipped_tuning_file_matches_defaults() {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets");
        let tuning = load_tuning(&assets).expect("shipped tuning");
        assert_eq!(tuning, GameTuning::default());
    }

    #[test]
    fn malformed_xml_reports_location() {
        let err = parse("<Tuning><gravity>1</Tuning>").expect_err("err");
        assert_eq!(err.code, TuningErrorCode::XmlMalformed);
        assert!(err.location.is_some());
    }
}
