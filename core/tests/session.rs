use sapper_core::*;

fn fixed(size: Coord2, mines: &[Coord2]) -> Session<EventLog> {
    let grid = Grid::new(size.0, size.1).unwrap();
    let layout = MineLayout::from_mine_coords(grid, mines).unwrap();
    let config = GameConfig::new(size.0, size.1, 1, layout.mine_count()).with_seed(9);
    Session::with_layout(config, layout, EventLog::new()).unwrap()
}

fn random(seed: u64) -> Session<EventLog> {
    Session::new(GameConfig::default().with_seed(seed), EventLog::new()).unwrap()
}

#[test]
fn default_session_places_forty_unique_mines() {
    for seed in 0..16 {
        let session = random(seed);
        let mines = session.mine_positions();

        assert_eq!(mines.len(), 40);
        assert_eq!(session.total_mines(), 40);
        assert_eq!(session.flags_remaining(), 40);
        assert!(mines.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(mines.iter().all(|&position| position.get() >= 1 && position.get() <= 286));
    }
}

#[test]
fn adjacency_matches_brute_force_on_random_boards() {
    for seed in 0..8 {
        let session = random(seed);
        let grid = session.grid();
        let mines: Vec<Coord2> = session
            .mine_positions()
            .into_iter()
            .map(|position| grid.to_coord(position).unwrap())
            .collect();

        for (x, y) in grid.iter_coords() {
            let expected = mines
                .iter()
                .filter(|&&(mx, my)| {
                    (mx, my) != (x, y) && mx.abs_diff(x) <= 1 && my.abs_diff(y) <= 1
                })
                .count() as u8;
            assert_eq!(session.tile_at((x, y)).unwrap().adjacent_mines(), expected);
        }
    }
}

#[test]
fn corner_reveal_on_four_by_four_cascades_to_the_border() {
    let mut session = fixed((4, 4), &[(4, 4)]);
    assert_eq!(session.mine_positions(), vec![Position(16)]);

    let outcome = session.reveal(Position(1));

    let revealed: Vec<_> = session.presenter().revealed().collect();
    assert_eq!(usize::from(session.safe_revealed_count()), revealed.len());
    assert_eq!(revealed.len(), 15);
    for position in [Position(11), Position(12), Position(15)] {
        assert!(revealed.contains(&(position, TileView::Count(1))));
    }
    assert_eq!(outcome, RevealOutcome::Won);
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn revealing_again_changes_nothing() {
    let mut session = fixed((5, 5), &[(5, 5), (1, 5)]);
    session.reveal(Position(13));
    let revealed = session.safe_revealed_count();
    let flags = session.flags_remaining();
    session.presenter_mut().drain();

    for position in session.grid().iter_positions() {
        if session.tile(position).unwrap().is_revealed() {
            assert_eq!(session.reveal(position), RevealOutcome::NoChange);
        }
    }

    assert_eq!(session.safe_revealed_count(), revealed);
    assert_eq!(session.flags_remaining(), flags);
    assert!(session.presenter().events().is_empty());
}

#[test]
fn won_exactly_when_every_safe_tile_is_open() {
    for seed in 0..8 {
        let mut session = random(seed);
        let mines = session.mine_positions();
        let total = session.grid().total_tiles();

        for position in session.grid().iter_positions() {
            if mines.contains(&position) {
                continue;
            }
            let outcome = session.reveal(position);
            let cleared = session.safe_revealed_count() + session.total_mines() == total;
            assert_eq!(session.status() == GameStatus::Won, cleared);
            if cleared {
                assert_eq!(outcome, RevealOutcome::Won);
                break;
            }
        }

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.presenter().events().last(), Some(&Event::Won));
    }
}

#[test]
fn hitting_a_mine_reports_every_mine_once() {
    let mut session = random(3);
    let mines = session.mine_positions();

    assert_eq!(session.reveal(mines[7]), RevealOutcome::HitMine);
    assert_eq!(session.status(), GameStatus::Lost);

    let mut reported: Vec<Position> = session
        .presenter()
        .revealed()
        .map(|(position, view)| {
            assert_eq!(view, TileView::Mine);
            position
        })
        .collect();
    reported.sort();
    assert_eq!(reported, mines);
    assert_eq!(session.presenter().events().last(), Some(&Event::Lost));
    assert!(mines.iter().all(|&position| session.tile(position).unwrap().is_revealed()));
}

#[test]
fn flag_toggle_round_trip_and_revealed_no_op() {
    let mut session = fixed((3, 3), &[(1, 1)]);
    let before = session.flags_remaining();

    session.toggle_flag(Position(5));
    session.toggle_flag(Position(5));
    assert_eq!(session.flags_remaining(), before);

    session.reveal(Position(5));
    assert_eq!(session.toggle_flag(Position(5)), MarkOutcome::NoChange);
    assert_eq!(session.flags_remaining(), before);
    assert!(!session.tile(Position(5)).unwrap().is_flagged());
}

#[test]
fn full_board_configuration_is_rejected() {
    let config = GameConfig::new(4, 4, 2, 8);

    assert_eq!(
        Session::new(config, ()).err(),
        Some(GameError::TooManyMines {
            requested: 16,
            total: 16
        })
    );
    assert!(Session::new(GameConfig::new(4, 4, 1, 15), ()).is_ok());
}

#[test]
fn restart_while_running_resets_everything() {
    let mut session = random(11);
    let first_board = session.mine_positions();
    let safe = session
        .grid()
        .iter_positions()
        .find(|position| !first_board.contains(position))
        .unwrap();
    session.reveal(safe);
    let old_token = session.timer_token().unwrap();
    session.tick(old_token);
    session.tick(old_token);
    assert_eq!(session.elapsed_secs(), 2);
    session.presenter_mut().drain();

    session.restart();

    assert_eq!(session.status(), GameStatus::NotStarted);
    assert_eq!(session.elapsed_secs(), 0);
    assert_eq!(session.safe_revealed_count(), 0);
    assert_eq!(session.flags_remaining(), 40);
    assert_ne!(session.mine_positions(), first_board);
    assert_eq!(
        session.presenter().events().first(),
        Some(&Event::TicksCancelled { token: old_token })
    );

    // a stale tick from the previous run never lands
    assert_eq!(session.tick(old_token), None);
    assert_eq!(session.elapsed_secs(), 0);
    assert!(!session
        .presenter()
        .events()
        .iter()
        .any(|event| matches!(event, Event::TimerTick { .. })));

    session.toggle_flag(Position(1));
    let new_token = session.timer_token().unwrap();
    assert_ne!(new_token, old_token);
    assert_eq!(session.tick(new_token), Some(1));
    assert_eq!(
        session.presenter().events().last(),
        Some(&Event::TimerTick { elapsed_secs: 1 })
    );
}

#[test]
fn restart_after_loss_starts_a_fresh_game() {
    let mut session = random(5);
    let mine = session.mine_positions()[0];
    session.reveal(mine);
    assert!(session.is_finished());

    session.restart();

    assert_eq!(session.status(), GameStatus::NotStarted);
    assert!(session
        .grid()
        .iter_positions()
        .all(|position| !session.tile(position).unwrap().is_revealed()));
}

#[test]
fn seeded_sessions_are_reproducible() {
    assert_eq!(random(21).mine_positions(), random(21).mine_positions());
}

#[test]
fn config_from_toml_drives_a_session() {
    let config = GameConfig::from_toml_str(
        r#"
        width = 9
        height = 9
        difficulty = 1
        base_mines = 10
        seed = 4
        "#,
    )
    .unwrap();

    let session = Session::new(config, ()).unwrap();

    assert_eq!(session.grid().size(), (9, 9));
    assert_eq!(session.total_mines(), 10);
}
