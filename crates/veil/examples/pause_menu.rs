//! Drives an exclusive two-screen group from a simulated tick loop.
//!
//! A HUD and a pause menu share one group. Opening the pause menu pauses
//! scaled time, but the menu keeps fading because it runs on unscaled time.
//! Going back restores the HUD. Run with `RUST_LOG=veil=debug` to watch the
//! group's history pushes.

use veil::{
    Easing, FadeConfig, GroupConfig, HeadlessSurface, Screen, ScreenGroup, ScreenId,
};

const FRAME: f32 = 1.0 / 60.0;

fn run_frames(group: &mut ScreenGroup, frames: u32) {
    for _ in 0..frames {
        group.tick(FRAME);
    }
    for (id, event) in group.take_events() {
        println!("  event: {id} -> {event:?}");
    }
}

fn print_state(group: &ScreenGroup) {
    for (id, screen) in group.screens() {
        println!(
            "  {id}: {:?} (opacity {:.2})",
            screen.phase(),
            screen.opacity()
        );
    }
}

fn main() {
    env_logger::init();

    let hud = ScreenId::new("hud");
    let pause = ScreenId::new("pause");

    let mut group = ScreenGroup::new(GroupConfig::default());
    group
        .register_screen(
            hud.clone(),
            Screen::new(HeadlessSurface::new()).with_fade(FadeConfig::fade(0.2)),
        )
        .expect("fresh id");
    group
        .register_screen(
            pause.clone(),
            Screen::new(HeadlessSurface::new())
                .with_fade(
                    FadeConfig::fade(0.3)
                        .with_easing(Easing::OutSine)
                        .with_unscaled_time(true),
                )
                .with_front_on_show(true),
        )
        .expect("fresh id");
    group.start();

    println!("showing HUD");
    group.show_screen(&hud, false).expect("hud is registered");
    run_frames(&mut group, 20);
    print_state(&group);

    println!("opening pause menu (scaled time frozen)");
    group.set_time_scale(0.0);
    group.show_screen(&pause, false).expect("pause is registered");
    run_frames(&mut group, 30);
    print_state(&group);

    println!("going back");
    group.set_time_scale(1.0);
    group.go_back(1).expect("history has a previous entry");
    run_frames(&mut group, 20);
    print_state(&group);
}
