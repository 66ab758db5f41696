//! Loading a board from a mapping file and writing it back.
//!
//! Per-line and per-entry failures follow the board's [`ErrorPolicy`]:
//! lenient boards log a warning and skip, strict boards abort. Failing to
//! open or create the file is always an error.
//!
//! [`ErrorPolicy`]: crate::config::ErrorPolicy

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::board::BoardController;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::mapping::{parse_line, MappingLine, ITEM_MARKER};

impl BoardController {
    /// Build a board from the mapping file at `path`.
    pub fn load_from_file(path: impl AsRef<Path>, config: BoardConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BoardError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let board = Self::load_from_reader(BufReader::new(file), config)?;
        debug!(
            path = %path.display(),
            categories = board.categories.len(),
            "board loaded"
        );
        Ok(board)
    }

    /// Build a board from mapping lines read from `reader`.
    ///
    /// Item lines attach to the most recently declared category. Under the
    /// lenient policy, items that follow a skipped declaration are skipped
    /// as well since they have no category to join.
    ///
    /// A line that is not valid UTF-8 is a per-line error. Any other read
    /// failure ends the load under both policies.
    pub fn load_from_reader<R: BufRead>(reader: R, config: BoardConfig) -> Result<Self> {
        let mut board = Self::with_config(config);
        let mut current: Option<String> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData && !board.config.is_strict() => {
                    warn!(line = line_no, error = %e, "skipping undecodable mapping line");
                    current = None;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            match board.apply_line(line_no, &line, &mut current) {
                Ok(()) => {}
                Err(e) if board.config.is_strict() => return Err(e),
                Err(e) => warn!(line = line_no, error = %e, "skipping mapping line"),
            }
        }
        Ok(board)
    }

    fn apply_line(
        &mut self,
        line_no: usize,
        line: &str,
        current: &mut Option<String>,
    ) -> Result<()> {
        // Any non-blank line without the item marker starts a new category,
        // even if it turns out to be malformed.
        if !line.trim().is_empty() && !line.starts_with(ITEM_MARKER) {
            *current = None;
        }
        let Some(parsed) = parse_line(line_no, line)? else {
            return Ok(());
        };
        match parsed {
            MappingLine::Category { image, name } => {
                self.declare_category(&image, &name)?;
                *current = Some(name);
            }
            MappingLine::Item { image, text } => {
                let Some(name) = current.as_deref() else {
                    return Err(BoardError::Parse {
                        line: line_no,
                        reason: "item line has no category to belong to".into(),
                    });
                };
                let category = self
                    .categories
                    .get_mut(name)
                    .map_err(|_| BoardError::UnknownCategory { name: name.to_string() })?;
                category.add_item(&image, &text)?;
            }
        }
        Ok(())
    }

    /// Write the board to the mapping file at `path`, replacing it.
    ///
    /// The file is written through a buffer that is flushed before
    /// returning, so a failed final write is reported rather than lost on
    /// drop.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| BoardError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let lines = self.write_to(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.display(), lines, "board written");
        Ok(())
    }

    /// Write the board as mapping lines and return how many were written.
    ///
    /// Each home selector is followed by the items of its category, both in
    /// insertion order.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize> {
        let mut written = 0;
        for (image, name) in self.home.entries() {
            let declaration = MappingLine::Category {
                image: image.to_string(),
                name: name.to_string(),
            };
            if self.write_line(writer, &declaration)? == 0 {
                // Items written without their declaration would join the
                // previous category on import.
                warn!(image, category = name, "declaration not written; skipping its items");
                continue;
            }
            written += 1;

            let Some(category) = self.category_by_name(name) else {
                let err = BoardError::UnknownCategory { name: name.to_string() };
                if self.config.is_strict() {
                    return Err(err);
                }
                warn!(image, error = %err, "selector without category; writing it alone");
                continue;
            };
            for (image, text) in category.entries() {
                let item = MappingLine::Item {
                    image: image.to_string(),
                    text: text.to_string(),
                };
                written += self.write_line(writer, &item)?;
            }
        }
        Ok(written)
    }

    /// Render the board in mapping-file form.
    pub fn to_mapping_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| {
            BoardError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn write_line<W: Write + ?Sized>(&self, writer: &mut W, line: &MappingLine) -> Result<usize> {
        let rendered = format!("{line}\n");
        match writer.write_all(rendered.as_bytes()) {
            Ok(()) => Ok(1),
            Err(e) if self.config.is_strict() => Err(e.into()),
            Err(e) => {
                warn!(image = line.image(), error = %e, "failed to write mapping line");
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BOARD: &str = "\
img/food/plate.png food
>img/food/fries.png french fries
>img/food/melon.png watermelon
img/clothing/hanger.png clothing
>img/clothing/shirt.png collared shirt
";

    fn load(text: &str, config: BoardConfig) -> Result<BoardController> {
        BoardController::load_from_reader(Cursor::new(text), config)
    }

    /// A writer that fails every write after the first `ok` calls.
    struct FlakyWriter {
        ok: usize,
        out: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.ok == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.ok -= 1;
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A writer that fails every write containing `needle`.
    struct RejectingWriter {
        needle: &'static str,
        out: Vec<u8>,
    }

    impl Write for RejectingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if String::from_utf8_lossy(buf).contains(self.needle) {
                return Err(io::Error::new(io::ErrorKind::Other, "rejected"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // Import
    // -----------------------------------------------------------------------

    #[test]
    fn load_builds_home_and_categories() {
        let board = load(BOARD, BoardConfig::default()).unwrap();
        assert_eq!(
            board.home().image_locs(),
            vec!["img/food/plate.png", "img/clothing/hanger.png"]
        );
        let food = board.category_by_name("food").unwrap();
        assert_eq!(food.select("img/food/melon.png").unwrap(), "watermelon");
        assert_eq!(board.category_by_name("clothing").unwrap().len(), 1);
    }

    #[test]
    fn lenient_load_skips_bad_lines() {
        let text = "\
>img/orphan.png no category yet
img/food/plate.png food

>img/food/fries.png french fries
>img/food/broken.png
>img/food/melon.png watermelon
";
        let board = load(text, BoardConfig::default()).unwrap();
        let food = board.category_by_name("food").unwrap();
        assert_eq!(
            food.image_locs(),
            vec!["img/food/fries.png", "img/food/melon.png"]
        );
        assert_eq!(board.home().len(), 1);
    }

    #[test]
    fn items_after_a_skipped_declaration_are_dropped() {
        let text = "\
img/food/plate.png food
img/bad.png  padded name
>img/bad/item.png lost
>img/bad/other.png also lost
img/lonely.png
>img/lonely/item.png lost too
img/clothing/hanger.png clothing
>img/clothing/shirt.png collared shirt
";
        let board = load(text, BoardConfig::default()).unwrap();
        assert!(board.category_by_name("food").unwrap().is_empty());
        assert_eq!(board.categories().count(), 2);
        assert_eq!(board.category_by_name("clothing").unwrap().len(), 1);
    }

    #[test]
    fn strict_load_aborts_on_first_bad_line() {
        let text = "img/food/plate.png food\n>img/food/fries.png\n";
        let err = load(text, BoardConfig::strict()).unwrap_err();
        assert!(matches!(err, BoardError::Parse { line: 2, .. }));
    }

    #[test]
    fn strict_load_rejects_orphan_item() {
        let err = load(">img/food/fries.png fries\n", BoardConfig::strict()).unwrap_err();
        assert!(matches!(err, BoardError::Parse { line: 1, .. }));
    }

    #[test]
    fn load_missing_file_is_a_file_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = BoardController::load_from_file(&path, BoardConfig::default()).unwrap_err();
        match err {
            BoardError::FileOpen { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_of_a_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        for config in [BoardConfig::default(), BoardConfig::strict()] {
            let err = BoardController::load_from_file(dir.path(), config).unwrap_err();
            assert!(matches!(err, BoardError::Io(_) | BoardError::FileOpen { .. }));
        }
    }

    #[test]
    fn lenient_load_skips_undecodable_line() {
        let bytes: &[u8] = b"img/food/plate.png food\n>img/food/\xff.png bad\n>img/food/fries.png french fries\nimg/clothing/hanger.png clothing\n>img/clothing/shirt.png collared shirt\n";
        let board = BoardController::load_from_reader(bytes, BoardConfig::default()).unwrap();
        // The undecodable line may have been a declaration, so the items
        // after it have no known category.
        assert!(board.category_by_name("food").unwrap().is_empty());
        assert_eq!(board.category_by_name("clothing").unwrap().len(), 1);

        let err = BoardController::load_from_reader(bytes, BoardConfig::strict()).unwrap_err();
        assert!(matches!(err, BoardError::Io(ref e) if e.kind() == io::ErrorKind::InvalidData));
    }

    #[test]
    fn doubled_separator_makes_an_invalid_name() {
        let text = "img/food/plate.png  food\n>img/food/fries.png french fries\n";
        let board = load(text, BoardConfig::default()).unwrap();
        assert_eq!(board.categories().count(), 0);
        assert!(board.home().is_empty());

        let err = load(text, BoardConfig::strict()).unwrap_err();
        assert!(matches!(err, BoardError::InvalidName { ref value, .. } if value == " food"));
    }

    #[test]
    fn load_uses_config() {
        let board = load(BOARD, BoardConfig::strict()).unwrap();
        assert!(board.config().is_strict());
        assert!(board.is_home());
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    #[test]
    fn export_reproduces_file_shape() {
        let board = load(BOARD, BoardConfig::default()).unwrap();
        assert_eq!(board.to_mapping_string().unwrap(), BOARD);
    }

    #[test]
    fn write_to_counts_lines() {
        let board = load(BOARD, BoardConfig::default()).unwrap();
        let mut out = Vec::new();
        assert_eq!(board.write_to(&mut out).unwrap(), 5);
    }

    #[test]
    fn export_of_empty_board_is_empty() {
        assert_eq!(BoardController::new().to_mapping_string().unwrap(), "");
    }

    #[test]
    fn file_roundtrip_preserves_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.txt");

        let mut board = load(BOARD, BoardConfig::default()).unwrap();
        board.select("img/clothing/hanger.png").unwrap();
        board.add_item("img/clothing/socks.png", "socks").unwrap();
        board.write_to_file(&path).unwrap();

        let mut reloaded = BoardController::load_from_file(&path, BoardConfig::default()).unwrap();
        assert!(reloaded.is_home());
        assert_eq!(reloaded.select("img/clothing/hanger.png").unwrap(), "");
        assert_eq!(reloaded.select("img/clothing/socks.png").unwrap(), "socks");
        assert_eq!(reloaded.select("img/food/plate.png").unwrap(), "");
        assert_eq!(reloaded.select("img/food/fries.png").unwrap(), "french fries");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), board.to_mapping_string().unwrap());
    }

    #[test]
    fn write_into_missing_directory_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("board.txt");
        let board = load(BOARD, BoardConfig::default()).unwrap();
        let err = board.write_to_file(&path).unwrap_err();
        assert!(matches!(err, BoardError::FileOpen { .. }));
    }

    #[test]
    fn selector_without_category_is_written_alone_when_lenient() {
        let mut board = load(BOARD, BoardConfig::default()).unwrap();
        // Bypass declaration to break the home/registry invariant.
        board.home.add_item("img/ghost.png", "ghost").unwrap();
        let text = board.to_mapping_string().unwrap();
        assert!(text.ends_with("img/ghost.png ghost\n"));
    }

    #[test]
    fn selector_without_category_fails_when_strict() {
        let mut board = load(BOARD, BoardConfig::strict()).unwrap();
        board.home.add_item("img/ghost.png", "ghost").unwrap();
        let err = board.to_mapping_string().unwrap_err();
        assert!(matches!(err, BoardError::UnknownCategory { ref name } if name == "ghost"));
    }

    #[test]
    fn lenient_export_continues_past_write_failures() {
        let board = load(BOARD, BoardConfig::default()).unwrap();
        let mut writer = FlakyWriter { ok: 2, out: Vec::new() };
        let written = board.write_to(&mut writer).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(writer.out).unwrap(),
            "img/food/plate.png food\n>img/food/fries.png french fries\n"
        );
    }

    #[test]
    fn lenient_export_drops_items_of_an_unwritten_declaration() {
        let board = load(BOARD, BoardConfig::default()).unwrap();
        let mut writer = RejectingWriter { needle: "hanger", out: Vec::new() };
        assert_eq!(board.write_to(&mut writer).unwrap(), 3);

        let text = String::from_utf8(writer.out).unwrap();
        assert_eq!(
            text,
            "img/food/plate.png food\n>img/food/fries.png french fries\n>img/food/melon.png watermelon\n"
        );
        let reloaded = load(&text, BoardConfig::strict()).unwrap();
        assert_eq!(
            reloaded.category_by_name("food").unwrap().image_locs(),
            vec!["img/food/fries.png", "img/food/melon.png"]
        );
        assert!(reloaded.category_by_name("clothing").is_none());
    }

    #[test]
    fn strict_export_stops_at_write_failure() {
        let board = load(BOARD, BoardConfig::strict()).unwrap();
        let mut writer = FlakyWriter { ok: 0, out: Vec::new() };
        let err = board.write_to(&mut writer).unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }
}
