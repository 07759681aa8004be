//! Lenient SGF reader producing a [`GameTree`].
//!
//! Recoverable problems are collected as [`Warnings`]; anything the data
//! model cannot represent aborts with an [`SgfError`].

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::Encoding;

use super::error::SgfError;
use super::lexer::{Lexer, Token};
use super::overtime::{OvertimeParse, parse_overtime};
use crate::game_info::GameInformation;
use crate::game_tree::{GameTree, NodeArena};
use crate::moves::Move;
use crate::node::{Node, NodeId};
use crate::point::Point;
use crate::stone::{Colour, Stone};
use crate::time_settings::TimeSettings;

/// Ordered, duplicate-free warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn add(&mut self, message: &str) {
        if !self.contains(message) {
            tracing::debug!(warning = message, "sgf warning");
            self.0.push(message.to_string());
        }
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|w| w == message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// All warnings separated by newlines, or `None` if there are none.
    pub fn joined(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join("\n"))
        }
    }
}

/// Result of a successful read.
#[derive(Debug, Clone)]
pub struct SgfGame {
    pub tree: GameTree,
    pub warnings: Warnings,
}

type ProgressFn = Box<dyn FnMut(u32)>;

/// Configurable SGF reader.
///
/// ```
/// use go_core::sgf::SgfReader;
///
/// let game = SgfReader::new()
///     .with_name("example.sgf")
///     .read("(;GM[1]SZ[9];B[cc])".as_bytes())
///     .unwrap();
/// assert_eq!(game.tree.board_size(), 9);
/// ```
pub struct SgfReader {
    name: Option<String>,
    progress: Option<ProgressFn>,
    size: u64,
    encoding: &'static Encoding,
}

impl fmt::Debug for SgfReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SgfReader")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("encoding", &self.encoding.name())
            .finish_non_exhaustive()
    }
}

impl Default for SgfReader {
    fn default() -> Self {
        SgfReader::new()
    }
}

impl SgfReader {
    /// Reader decoding ISO-8859-1 until a `CA` property says otherwise.
    pub fn new() -> Self {
        SgfReader {
            name: None,
            progress: None,
            size: 0,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Name prefixed to error locations, usually the file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Callback receiving the percentage of input read, from 0 to 100.
    pub fn with_progress(mut self, callback: impl FnMut(u32) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Total input size in bytes, for progress reporting.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_default_charset(mut self, label: &str) -> Result<Self, SgfError> {
        self.encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SgfError::UnknownCharset(label.to_string()))?;
        Ok(self)
    }

    /// Read from a stream that cannot be reopened. A `CA` property is
    /// ignored.
    pub fn read<R: Read>(self, input: R) -> Result<SgfGame, SgfError> {
        self.run(input, None::<fn() -> io::Result<R>>)
    }

    /// Read from a stream; `reopen` must return a fresh stream over the
    /// same bytes and is used once if a `CA` property changes the charset.
    pub fn read_reopenable<R, F>(self, input: R, reopen: F) -> Result<SgfGame, SgfError>
    where
        R: Read,
        F: FnMut() -> io::Result<R>,
    {
        self.run(input, Some(reopen))
    }

    /// Read a file, honouring its `CA` property.
    pub fn read_file(mut self, path: impl AsRef<Path>) -> Result<SgfGame, SgfError> {
        let path = path.as_ref();
        let open = || {
            File::open(path).map(io::BufReader::new).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SgfError::FileNotFound(path.to_path_buf()),
                _ => SgfError::Io(e),
            })
        };
        let file = open()?;
        if self.name.is_none() {
            self.name = Some(path.display().to_string());
        }
        if self.size == 0
            && let Ok(metadata) = file.get_ref().metadata()
        {
            self.size = metadata.len();
        }
        self.run(file, Some(|| File::open(path).map(io::BufReader::new)))
    }

    fn run<R, F>(self, input: R, reopen: Option<F>) -> Result<SgfGame, SgfError>
    where
        R: Read,
        F: FnMut() -> io::Result<R>,
    {
        let mut progress = Progress {
            callback: self.progress,
            size: self.size,
            last: 0,
        };
        progress.start();
        let restartable = reopen.is_some();
        let pass = Parser::new(input, self.encoding, self.name.clone(), &mut progress, restartable)
            .parse()?;
        match (pass, reopen) {
            (Pass::Complete(game), _) => Ok(game),
            (Pass::Restart(encoding), Some(mut reopen)) => {
                tracing::debug!(charset = encoding.name(), "restarting SGF read");
                let input = reopen().map_err(SgfError::Reopen)?;
                match Parser::new(input, encoding, self.name, &mut progress, false).parse()? {
                    Pass::Complete(game) => Ok(game),
                    Pass::Restart(_) => unreachable!("charset restart after restart"),
                }
            }
            (Pass::Restart(_), None) => unreachable!("charset restart without reopen"),
        }
    }
}

/// Parse SGF text. `CA` is ignored because the text is already decoded.
pub fn parse(input: &str) -> Result<SgfGame, SgfError> {
    SgfReader {
        encoding: encoding_rs::UTF_8,
        ..SgfReader::new()
    }
    .read(input.as_bytes())
}

struct Progress {
    callback: Option<ProgressFn>,
    size: u64,
    last: u32,
}

impl Progress {
    fn start(&mut self) {
        if let Some(callback) = &mut self.callback {
            callback(0);
        }
    }

    fn report(&mut self, bytes_read: u64) {
        let Some(callback) = &mut self.callback else {
            return;
        };
        let percent = if self.size > 0 {
            (bytes_read.saturating_mul(100) / self.size).min(100) as u32
        } else {
            100
        };
        if percent != self.last {
            callback(percent);
            self.last = percent;
        }
    }
}

enum Pass {
    Complete(SgfGame),
    Restart(&'static Encoding),
}

/// Time properties collected while reading, applied at the end.
#[derive(Debug, Default)]
struct TimeProps {
    pre_byoyomi_ms: Option<f64>,
    byoyomi_ms: Option<f64>,
    byoyomi_moves: Option<i64>,
    ignore_all: bool,
    ignore_overtime: bool,
}

impl TimeProps {
    fn settings(&self) -> Option<TimeSettings> {
        if self.ignore_all {
            return None;
        }
        let pre = self.pre_byoyomi_ms.filter(|&ms| ms >= 1.0)? as u64;
        let overtime = match (self.byoyomi_ms, self.byoyomi_moves) {
            (Some(byo), Some(moves)) if !self.ignore_overtime && byo >= 1.0 && moves >= 1 => {
                u32::try_from(moves).ok().map(|moves| (byo as u64, moves))
            }
            _ => None,
        };
        Some(match overtime {
            Some((byo, moves)) => TimeSettings::with_byoyomi(pre, byo, moves),
            None => TimeSettings::new(pre),
        })
    }
}

/// One pass over the input with a fixed charset.
struct Parser<'p, R> {
    lexer: Lexer<R>,
    progress: &'p mut Progress,
    restartable: bool,
    encoding: &'static Encoding,
    arena: NodeArena,
    info: GameInformation,
    size_fixed: bool,
    time: TimeProps,
    warnings: Warnings,
}

impl<'p, R: Read> Parser<'p, R> {
    fn new(
        input: R,
        encoding: &'static Encoding,
        name: Option<String>,
        progress: &'p mut Progress,
        restartable: bool,
    ) -> Self {
        Parser {
            lexer: Lexer::new(input, encoding, name),
            progress,
            restartable,
            encoding,
            arena: NodeArena::new(),
            info: GameInformation::default(),
            size_fixed: false,
            time: TimeProps::default(),
            warnings: Warnings::default(),
        }
    }

    fn parse(mut self) -> Result<Pass, SgfError> {
        self.find_root()?;
        let wrapper = self.arena.create();
        let mut current = wrapper;
        let mut variations: Vec<NodeId> = Vec::new();
        let mut is_root = true;
        loop {
            self.progress.report(self.lexer.bytes_read());
            match self.lexer.next_token()? {
                Token::Open => variations.push(current),
                Token::Close => match variations.pop() {
                    Some(father) => current = father,
                    None => break,
                },
                Token::Eof => {
                    self.warnings.add("Game tree not closed");
                    break;
                }
                Token::Semicolon => {
                    let node = self.arena.append_new(current, Node::new());
                    if let Some(encoding) = self.read_properties(node, is_root)? {
                        return Ok(Pass::Restart(encoding));
                    }
                    is_root = false;
                    current = node;
                }
                Token::Ident(_) | Token::Other(_) => {
                    return Err(self.lexer.structural("Next node expected"));
                }
            }
        }

        let single = match *self.arena.children(wrapper) {
            [only] => Some(only),
            _ => None,
        };
        let root = match single {
            Some(only) => {
                self.arena.truncate_children(wrapper);
                only
            }
            None => wrapper,
        };
        self.info.time_settings = self.time.settings();
        let mut tree = GameTree::from_parts(self.info, self.arena, root);
        apply_fixes(&mut tree);
        tracing::trace!(nodes = tree.node_count(), "sgf pass complete");
        Ok(Pass::Complete(SgfGame {
            tree,
            warnings: self.warnings,
        }))
    }

    /// Skip to the first `(` that is followed by a node.
    fn find_root(&mut self) -> Result<(), SgfError> {
        loop {
            match self.lexer.next_token()? {
                Token::Open => {
                    if self.lexer.peek_token()? == Token::Semicolon {
                        return Ok(());
                    }
                    self.warnings.add("Extra text before SGF tree");
                }
                Token::Eof => return Err(self.lexer.structural("No root tree found")),
                _ => self.warnings.add("Extra text before SGF tree"),
            }
        }
    }

    /// Read the properties of `node`. Returns a charset if the input must
    /// be read again with it.
    fn read_properties(
        &mut self,
        node: NodeId,
        is_root: bool,
    ) -> Result<Option<&'static Encoding>, SgfError> {
        while let Token::Ident(ident) = self.lexer.peek_token()? {
            self.lexer.next_token()?;
            let values = self.lexer.read_values()?;
            if values.is_empty() {
                return Err(self
                    .lexer
                    .structural(format!("Property '{ident}' has no value")));
            }
            let name = self.canonical_name(ident);
            if let Some(encoding) = self.read_property(node, is_root, &name, values)? {
                return Ok(Some(encoding));
            }
        }
        Ok(None)
    }

    /// Map long property names of early SGF versions to the standard ones.
    fn canonical_name(&mut self, ident: String) -> String {
        let short = match ident.as_str() {
            "ADDBLACK" => "AB",
            "ADDEMPTY" => "AE",
            "ADDWHITE" => "AW",
            "BLACK" => "B",
            "COMMENT" => "C",
            "DATE" => "DT",
            "GAME" => "GM",
            "HANDICAP" => "HA",
            "KOMI" => "KM",
            "PLAYERBLACK" => "PB",
            "PLAYERWHITE" => "PW",
            "PLAYER" => "PL",
            "RESULT" => "RE",
            "RULES" => "RU",
            "SIZE" => "SZ",
            "WHITE" => "W",
            _ => return ident,
        };
        self.warnings.add("Verbose names for standard properties");
        short.to_string()
    }

    fn read_property(
        &mut self,
        id: NodeId,
        is_root: bool,
        name: &str,
        values: Vec<String>,
    ) -> Result<Option<&'static Encoding>, SgfError> {
        let v = values[0].as_str();
        match name {
            "AB" | "AW" => {
                let stone = if name == "AB" { Stone::Black } else { Stone::White };
                for value in &values {
                    for point in self.parse_point_list(value)? {
                        self.arena[id].add_stone(stone, point);
                    }
                }
                self.size_fixed = true;
            }
            "AE" => return Err(self.lexer.semantic("Add empty not supported")),
            "B" | "W" => {
                let colour = if name == "B" { Colour::Black } else { Colour::White };
                let point = self.parse_point(v)?;
                self.arena[id].set_move(Some(Move::new(point, colour)));
                self.size_fixed = true;
            }
            "BL" | "WL" => {
                if let Ok(seconds) = v.trim().parse::<f64>() {
                    let stone = if name == "BL" { Stone::Black } else { Stone::White };
                    self.arena[id].set_time_left(stone, seconds);
                }
            }
            "OB" | "OW" => {
                if let Ok(moves) = v.trim().parse::<u32>() {
                    let stone = if name == "OB" { Stone::Black } else { Stone::White };
                    self.arena[id].set_moves_left(stone, moves);
                }
            }
            "C" => {
                let node = &mut self.arena[id];
                let comment = match node.comment() {
                    Some(existing) => format!("{existing}\n{}", v.trim()),
                    None => v.trim().to_string(),
                };
                node.set_comment(Some(comment));
            }
            "CA" => {
                if is_root && self.restartable {
                    self.restartable = false;
                    match Encoding::for_label(v.trim().as_bytes()) {
                        Some(encoding) if encoding != self.encoding => return Ok(Some(encoding)),
                        Some(_) => {}
                        None => self.warnings.add("Unknown character set"),
                    }
                }
            }
            "BR" => self.info.rank_black = Some(v.to_string()),
            "WR" => self.info.rank_white = Some(v.to_string()),
            "DT" => self.info.date = Some(v.to_string()),
            "PB" => self.info.player_black = Some(v.to_string()),
            "PW" => self.info.player_white = Some(v.to_string()),
            "RE" => self.info.result = Some(v.to_string()),
            "RU" => self.info.rules = Some(v.to_string()),
            "FF" => {
                if !matches!(v.trim().parse::<i32>(), Ok(1..=4)) {
                    self.warnings.add("Unknown SGF file format version");
                }
            }
            "GM" => match v.trim() {
                "" => self.warnings.add("Empty value for game type"),
                "1" => {}
                _ => return Err(self.lexer.semantic("Not a Go game")),
            },
            "HA" => match v.trim().parse::<u32>() {
                Ok(handicap) => self.info.handicap = handicap,
                Err(_) => self.warnings.add("Invalid handicap value"),
            },
            "KM" => match v.trim().parse::<f64>() {
                Ok(komi) => self.info.komi = komi,
                Err(_) => self.warnings.add("Invalid value for komi"),
            },
            "OM" => match v.trim().parse::<i64>() {
                Ok(moves) => self.time.byoyomi_moves = Some(moves),
                Err(_) => {
                    self.warnings.add("Invalid value for byoyomi moves");
                    self.time.ignore_overtime = true;
                }
            },
            "OP" => match parse_seconds(v) {
                Some(ms) => self.time.byoyomi_ms = Some(ms),
                None => {
                    self.warnings.add("Invalid value for byoyomi time");
                    self.time.ignore_overtime = true;
                }
            },
            "OT" => match parse_overtime(v) {
                OvertimeParse::Recognized(overtime) if in_ms_range(overtime.byoyomi_ms) => {
                    self.time.byoyomi_moves = Some(overtime.moves);
                    self.time.byoyomi_ms = Some(overtime.byoyomi_ms);
                }
                OvertimeParse::Recognized(_) | OvertimeParse::InvalidValues => {
                    self.warnings.add("Invalid byoyomi values");
                    self.time.ignore_overtime = true;
                }
                OvertimeParse::Unknown => {
                    self.warnings.add("Unknown overtime specification");
                    self.time.ignore_overtime = true;
                }
            },
            "PL" => {
                let player = self.parse_colour(v)?;
                self.arena[id].set_player(Some(player));
            }
            "SZ" => self.read_size(v, is_root)?,
            "TM" => match parse_seconds(v) {
                Some(ms) => self.time.pre_byoyomi_ms = Some(ms),
                None => {
                    self.warnings.add("Invalid value for time");
                    self.time.ignore_all = true;
                }
            },
            "AP" => {}
            _ => self.arena[id].add_sgf_property(name, values),
        }
        Ok(None)
    }

    fn read_size(&mut self, v: &str, is_root: bool) -> Result<(), SgfError> {
        if !is_root {
            if self.size_fixed {
                return Err(self.lexer.semantic("Size property outside root node"));
            }
            self.warnings.add("Size property not in root node");
        }
        match v.trim().parse::<i64>() {
            Ok(size) if (1..=crate::point::MAX_SIZE as i64).contains(&size) => {
                self.info.board_size = size as u8;
            }
            Ok(_) => return Err(self.lexer.semantic("Invalid board size value")),
            Err(_) => self.warnings.add("Invalid board size value"),
        }
        self.size_fixed = true;
        Ok(())
    }

    fn parse_colour(&self, v: &str) -> Result<Stone, SgfError> {
        match v.trim().to_ascii_lowercase().as_str() {
            "b" | "1" => Ok(Stone::Black),
            "w" | "2" => Ok(Stone::White),
            _ => Err(self.lexer.semantic("Invalid color value")),
        }
    }

    /// Point in SGF coordinates; `None` is a pass.
    fn parse_point(&mut self, s: &str) -> Result<Option<Point>, SgfError> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Ok(None);
        }
        let size = i32::from(self.info.board_size);
        if s == "tt" && size <= 19 {
            return Ok(None);
        }
        let mut chars = s.chars();
        let (Some(col), Some(row)) = (chars.next(), chars.next()) else {
            return Err(self.lexer.semantic(format!("Invalid coordinates: {s}")));
        };
        let x = col as i32 - 'a' as i32;
        let y = size - (row as i32 - 'a' as i32) - 1;
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            if x == size && y == -1 {
                self.warnings.add("Non-standard pass move encoding");
                return Ok(None);
            }
            return Err(self.lexer.semantic(format!("Invalid coordinates: {s}")));
        }
        Ok(Some(Point::new(x as u8, y as u8)))
    }

    /// A single point or a compressed rectangle `aa:cc`. Passes are dropped.
    fn parse_point_list(&mut self, value: &str) -> Result<Vec<Point>, SgfError> {
        let Some((from, to)) = value.split_once(':') else {
            return Ok(self.parse_point(value)?.into_iter().collect());
        };
        let (Some(a), Some(b)) = (self.parse_point(from)?, self.parse_point(to)?) else {
            return Err(self.lexer.semantic(format!("Invalid coordinates: {value}")));
        };
        let mut points = Vec::new();
        for x in a.x().min(b.x())..=a.x().max(b.x()) {
            for y in (a.y().min(b.y())..=a.y().max(b.y())).rev() {
                points.push(Point::new(x, y));
            }
        }
        Ok(points)
    }
}

/// Seconds as milliseconds, if finite and within the clock's `i64` range.
fn parse_seconds(v: &str) -> Option<f64> {
    let ms = v.trim().parse::<f64>().ok()? * 1000.0;
    in_ms_range(ms).then_some(ms)
}

fn in_ms_range(ms: f64) -> bool {
    ms.is_finite() && ms.abs() < i64::MAX as f64
}

/// Infer the side to move in a root holding setup stones.
fn apply_fixes(tree: &mut GameTree) {
    let root = tree.root();
    let handicap = tree.info().handicap;
    let arena = tree.arena_mut();
    if !arena[root].has_setup() || arena[root].player().is_some() {
        return;
    }
    if handicap > 0 {
        arena[root].set_player(Some(Stone::White));
        return;
    }
    let colours: Vec<Colour> = arena
        .children(root)
        .iter()
        .filter_map(|&child| arena[child].get_move().map(|m| m.colour))
        .collect();
    let black = colours.contains(&Colour::Black);
    let white = colours.contains(&Colour::White);
    match (black, white) {
        (true, false) => arena[root].set_player(Some(Stone::Black)),
        (false, true) => arena[root].set_player(Some(Stone::White)),
        _ => {}
    }
}
