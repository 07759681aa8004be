use std::fmt::Display;

use crate::game_info::GameInformation;
use crate::game_tree::{GameTree, NodeArena};
use crate::node::{Node, NodeId};
use crate::point::Point;
use crate::stone::Stone;
use crate::time_settings::TimeSettings;

const APPLICATION: &str = concat!("go-core:", env!("CARGO_PKG_VERSION"));

/// Serialize a game tree to SGF text (FF[4], UTF-8).
///
/// Moves whose colour is [`Colour::Empty`](crate::stone::Colour::Empty) are left out; their nodes are
/// kept.
pub fn write(tree: &GameTree) -> String {
    let mut buf = String::new();
    let size = tree.board_size();
    buf.push_str("(;");
    write_text("FF", "4", &mut buf);
    write_text("CA", "UTF-8", &mut buf);
    write_text("AP", APPLICATION, &mut buf);
    write_text("GM", "1", &mut buf);
    write_number("SZ", size, &mut buf);
    write_info(tree.info(), &mut buf);
    let arena = tree.arena();
    write_properties(&arena[tree.root()], size, &mut buf);
    write_children(arena, tree.root(), size, &mut buf);
    buf.push_str(")\n");
    buf
}

fn write_info(info: &GameInformation, buf: &mut String) {
    let texts = [
        ("PB", &info.player_black),
        ("PW", &info.player_white),
        ("BR", &info.rank_black),
        ("WR", &info.rank_white),
        ("DT", &info.date),
        ("RE", &info.result),
        ("RU", &info.rules),
    ];
    for (ident, value) in texts {
        if let Some(value) = value {
            write_text(ident, value, buf);
        }
    }
    write_real("KM", info.komi, buf);
    if info.handicap > 0 {
        write_number("HA", info.handicap, buf);
    }
    if let Some(settings) = &info.time_settings {
        write_time_settings(settings, buf);
    }
}

fn write_time_settings(settings: &TimeSettings, buf: &mut String) {
    write_real("TM", settings.pre_byoyomi_ms() as f64 / 1000.0, buf);
    let Some(byoyomi) = settings.byoyomi() else {
        return;
    };
    if byoyomi.time_ms % 1000 == 0 {
        let overtime = format!("{} moves / {} sec", byoyomi.moves, byoyomi.time_ms / 1000);
        write_text("OT", &overtime, buf);
    } else {
        write_number("OM", byoyomi.moves, buf);
        write_real("OP", byoyomi.time_ms as f64 / 1000.0, buf);
    }
}

/// Children of `id`: a single child continues the sequence, several open
/// one parenthesized variation each.
fn write_children(arena: &NodeArena, id: NodeId, size: u8, buf: &mut String) {
    let mut current = id;
    loop {
        match arena.children(current) {
            [] => return,
            [only] => {
                buf.push(';');
                write_properties(&arena[*only], size, buf);
                current = *only;
            }
            children => {
                for &child in children {
                    buf.push_str("(;");
                    write_properties(&arena[child], size, buf);
                    write_children(arena, child, size, buf);
                    buf.push(')');
                }
                return;
            }
        }
    }
}

fn write_properties(node: &Node, size: u8, buf: &mut String) {
    // An Empty-colour move has no SGF form and is not written.
    if let Some(mv) = node.get_move()
        && let Some(stone) = mv.colour.stone()
    {
        buf.push_str(stone.letter());
        buf.push('[');
        if let Some(point) = mv.point {
            push_point(buf, point, size);
        }
        buf.push(']');
    }
    for (ident, stone) in [("AB", Stone::Black), ("AW", Stone::White)] {
        let points = node.setup(stone);
        if !points.is_empty() {
            write_point_list(ident, points, size, buf);
        }
    }
    if let Some(player) = node.player() {
        write_text("PL", player.letter(), buf);
    }
    if let Some(comment) = node.comment() {
        write_text("C", comment, buf);
    }
    for (time, moves, stone) in [("BL", "OB", Stone::Black), ("WL", "OW", Stone::White)] {
        if let Some(seconds) = node.time_left(stone) {
            write_real(time, seconds, buf);
        }
        if let Some(left) = node.moves_left(stone) {
            write_number(moves, left, buf);
        }
    }
    for property in node.sgf_properties() {
        buf.push_str(&property.name);
        for value in &property.values {
            buf.push('[');
            push_escaped(buf, value);
            buf.push(']');
        }
    }
}

fn push_point(buf: &mut String, point: Point, size: u8) {
    buf.push((b'a' + point.x()) as char);
    buf.push((b'a' + (size - point.y() - 1)) as char);
}

fn push_escaped(buf: &mut String, s: &str) {
    for ch in s.chars() {
        if matches!(ch, ']' | '\\') {
            buf.push('\\');
        }
        buf.push(ch);
    }
}

fn write_number(ident: &str, n: impl Display, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    buf.push_str(&n.to_string());
    buf.push(']');
}

fn write_real(ident: &str, n: f64, buf: &mut String) {
    // 6.0 is written as "6", 6.5 as "6.5"
    if n.fract() == 0.0 {
        write_number(ident, n as i64, buf);
    } else {
        write_number(ident, n, buf);
    }
}

fn write_text(ident: &str, s: &str, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    push_escaped(buf, s);
    buf.push(']');
}

fn write_point_list(ident: &str, points: &[Point], size: u8, buf: &mut String) {
    buf.push_str(ident);
    for &point in points {
        buf.push('[');
        push_point(buf, point, size);
        buf.push(']');
    }
}
