//! Property tests for the simulation's positional guarantees

use proptest::prelude::*;
use retro_pong::Settings;
use retro_pong::sim::{Ball, FixedRandom, GameRng, Match, Paddle, PaddleSide, Player};

fn court() -> (Settings, Paddle, Paddle) {
    let settings = Settings::default();
    let left = Paddle::new(&settings, PaddleSide::Left).unwrap();
    let right = Paddle::new(&settings, PaddleSide::Right).unwrap();
    (settings, left, right)
}

proptest! {
    #[test]
    fn ball_stays_inside_vertical_band(
        x in 0.0f64..640.0,
        y in 17.0f64..=463.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
        dts in prop::collection::vec(0.0f64..0.5, 1..40),
    ) {
        let (settings, left, right) = court();
        let mut ball = Ball::new(&settings).unwrap();
        ball.set_position(x, y);
        ball.set_velocity(dx, dy);
        let (min_y, max_y) = ball.vertical_bounds();
        for dt in dts {
            ball.update(dt, &left, &right);
            let p = ball.position();
            prop_assert!(p.y >= min_y && p.y <= max_y, "y={} outside {}..{}", p.y, min_y, max_y);
        }
    }

    #[test]
    fn paddle_stays_clamped_for_any_dt(
        dt in 0.0f64..1.0e6,
        up in any::<bool>(),
        side in prop_oneof![Just(PaddleSide::Left), Just(PaddleSide::Right)],
    ) {
        let settings = Settings::default();
        let ball = Ball::new(&settings).unwrap();
        let mut paddle = Paddle::new(&settings, side).unwrap();
        if up { paddle.move_up() } else { paddle.move_down() }
        paddle.update(dt, &ball, &mut FixedRandom(0.0));
        let (min_y, max_y) = paddle.vertical_bounds();
        prop_assert!(paddle.top() >= min_y && paddle.top() <= max_y);
        // Width and side never change
        prop_assert_eq!(paddle.right() - paddle.left(), settings.paddle_width);
        prop_assert_eq!(paddle.side(), side);
    }

    #[test]
    fn footprint_trail_is_bounded(steps in 1usize..400, seed in any::<u64>()) {
        let mut game = Match::new(Settings::default(), Box::new(GameRng::new(seed))).unwrap();
        game.start(0);
        for _ in 0..steps {
            game.update(1.0 / 60.0);
            prop_assert!(game.ball().footprint_count() <= retro_pong::sim::MAX_FOOTPRINTS);
        }
    }

    #[test]
    fn demo_match_never_exceeds_win_score(seed in any::<u64>()) {
        let mut game = Match::new(Settings::default(), Box::new(GameRng::new(seed))).unwrap();
        game.start(0);
        for _ in 0..600 {
            game.update(0.05);
            let [l, r] = game.scores();
            prop_assert!(l <= 9 && r <= 9);
            let (min_y, max_y) = game.ball().vertical_bounds();
            let y = game.ball().position().y;
            prop_assert!(y >= min_y && y <= max_y);
            if !game.is_playing() {
                prop_assert!(game.winner().is_some());
                let winner = game.winner().unwrap();
                prop_assert_eq!(game.scores()[winner.index()], 9);
                break;
            }
        }
    }
}

#[test]
fn levels_track_score_difference_through_a_match() {
    let mut game = Match::new(Settings::default(), Box::new(FixedRandom(200.0))).unwrap();
    game.start(0);
    game.goal(Player::Left);
    game.goal(Player::Left);
    game.goal(Player::Right);
    assert_eq!(game.level(Player::Left), 9);
    assert_eq!(game.level(Player::Right), 7);
    assert_eq!(
        game.paddle(Player::Left).level(),
        retro_pong::sim::LEVELS[9]
    );
}
