mod error;
mod lexer;
mod overtime;
mod reader;
mod writer;

pub use error::{Location, SgfError};
pub use reader::{SgfGame, SgfReader, Warnings, parse};
pub use writer::write;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_ops;
    use crate::stone::Stone;

    /// Parse, write, parse again and check the second write is identical.
    fn round_trip(input: &str) -> SgfGame {
        let game = parse(input).unwrap();
        let output = write(&game.tree);
        let reparsed = parse(&output).unwrap();
        assert!(reparsed.warnings.is_empty(), "{:?}", reparsed.warnings);
        assert_eq!(write(&reparsed.tree), output);
        assert_eq!(reparsed.tree.info(), game.tree.info());
        assert_eq!(reparsed.tree.node_count(), game.tree.node_count());
        reparsed
    }

    #[test]
    fn round_trip_simple_game() {
        let game = round_trip("(;FF[4]GM[1]SZ[19]PB[Alice]PW[Bob]KM[6.5];B[pd];W[dd];B[pp];W[dp])");
        let info = game.tree.info();
        assert_eq!(info.player_black.as_deref(), Some("Alice"));
        assert_eq!(info.komi, 6.5);
        let last = node_ops::last(game.tree.arena(), game.tree.root());
        assert_eq!(node_ops::move_number(game.tree.arena(), last), 4);
    }

    #[test]
    fn round_trip_with_variations() {
        let game = round_trip("(;FF[4]GM[1]SZ[9];B[ee](;W[ge];B[dg])(;W[de];B[fg]))");
        assert!(game.tree.has_variations());
    }

    #[test]
    fn round_trip_with_setup() {
        let game = round_trip("(;FF[4]GM[1]SZ[9]AB[dd][df][fd]AW[ee][eg])");
        let root = &game.tree.arena()[game.tree.root()];
        assert_eq!(root.setup(Stone::Black).len(), 3);
        assert_eq!(root.setup(Stone::White).len(), 2);
    }

    #[test]
    fn round_trip_with_comments_and_escapes() {
        let game = round_trip(r"(;C[This has a \] bracket and a \\ backslash])");
        let root = &game.tree.arena()[game.tree.root()];
        assert_eq!(root.comment(), Some(r"This has a ] bracket and a \ backslash"));
    }

    #[test]
    fn round_trip_pass_moves() {
        let game = round_trip("(;B[dd];W[];B[])");
        let last = node_ops::last(game.tree.arena(), game.tree.root());
        assert!(game.tree.arena()[last].get_move().unwrap().is_pass());
    }

    #[test]
    fn round_trip_unknown_properties() {
        let game = round_trip("(;FF[4]XX[foo][bar])");
        let root = &game.tree.arena()[game.tree.root()];
        assert_eq!(root.sgf_property("XX").unwrap().values, vec!["foo", "bar"]);
    }

    #[test]
    fn round_trip_markup() {
        round_trip("(;TR[aa][bb]CR[cc]MA[dd]SQ[ee]LB[ff:A][gg:B])");
    }

    #[test]
    fn round_trip_game_info() {
        let game = round_trip(
            "(;FF[4]GM[1]SZ[19]PB[Lee Sedol]PW[AlphaGo]BR[9p]WR[9p]RE[W+R]\
             EV[Google DeepMind Challenge]DT[2016-03-09]KM[7.5]RU[Chinese]TM[7200])",
        );
        let time = game.tree.info().time_settings.unwrap();
        assert_eq!(time.pre_byoyomi_ms(), 7_200_000);
        assert!(!time.use_byoyomi());
    }

    #[test]
    fn round_trip_byoyomi() {
        let game = round_trip("(;TM[600]OT[5x30 byo-yomi];B[aa]BL[590]OB[5])");
        let time = game.tree.info().time_settings.unwrap();
        assert_eq!(time.byoyomi().map(|b| (b.time_ms, b.moves)), Some((30_000, 5)));
    }

    #[test]
    fn round_trip_real_game_fragment() {
        let input = concat!(
            "(;FF[4]GM[1]SZ[19]",
            "PB[Honinbo Shusaku]PW[Gennan Inseki]",
            "RE[B+2]KM[0]HA[0]",
            ";B[qd];W[dc];B[pq];W[cp]",
            ";B[ce];W[ed];B[cf]",
            "C[A classic opening]",
            ";W[oc])",
        );
        let game = round_trip(input);
        let arena = game.tree.arena();
        let node = node_ops::find_by_move_number(arena, game.tree.root(), 7).unwrap();
        assert_eq!(arena[node].comment(), Some("A classic opening"));
    }
}
