//! Feeds raw touch events through Bevy's `Touches` and the joystick system.

use bevy::input::touch::{touch_screen_input_system, TouchInput, TouchPhase, Touches};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};

use gallery::input::{touch_joystick, Action, ActiveJoystick, InputState, JoystickDirection};

struct Screen {
    world: World,
    window: Entity,
    frame: Schedule,
}

impl Screen {
    fn new() -> Self {
        let mut world = World::new();
        world.init_resource::<Events<TouchInput>>();
        world.init_resource::<Touches>();
        world.insert_resource(ActiveJoystick::default());
        world.insert_resource(InputState::default());
        let window = world
            .spawn((Window { resolution: WindowResolution::new(1000.0, 800.0), ..default() }, PrimaryWindow))
            .id();

        let mut frame = Schedule::default();
        frame.add_systems((touch_screen_input_system, touch_joystick).chain());

        Self { world, window, frame }
    }

    fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) {
        self.world.send_event(TouchInput {
            phase,
            position: Vec2::new(x, y),
            window: self.window,
            force: None,
            id,
        });
        self.frame.run(&mut self.world);
        self.world.resource_mut::<Events<TouchInput>>().update();
    }

    fn input(&self) -> &InputState {
        self.world.resource::<InputState>()
    }

    fn owner(&self) -> Option<u64> {
        self.world.resource::<ActiveJoystick>().touch
    }
}

#[test]
fn drag_in_the_corner_steers_until_release() {
    let mut screen = Screen::new();

    screen.touch(7, TouchPhase::Started, 100.0, 700.0);
    assert_eq!(screen.owner(), Some(7));
    assert_eq!(screen.input().joystick(), None);

    screen.touch(7, TouchPhase::Moved, 100.0, 640.0);
    assert_eq!(screen.input().joystick(), Some(JoystickDirection::Up));
    assert!(screen.input().is_held(Action::Forward));

    screen.touch(7, TouchPhase::Moved, 170.0, 650.0);
    assert_eq!(screen.input().joystick(), Some(JoystickDirection::Right));
    assert!(!screen.input().is_held(Action::Forward));

    screen.touch(7, TouchPhase::Ended, 170.0, 650.0);
    assert_eq!(screen.owner(), None);
    assert_eq!(screen.input().joystick(), None);
    assert!(!screen.input().is_held(Action::Right));
}

#[test]
fn cancelled_touch_also_ends_the_stick() {
    let mut screen = Screen::new();
    screen.touch(3, TouchPhase::Started, 50.0, 750.0);
    screen.touch(3, TouchPhase::Moved, 50.0, 790.0);
    assert_eq!(screen.input().joystick(), Some(JoystickDirection::Down));

    screen.touch(3, TouchPhase::Canceled, 50.0, 790.0);
    assert_eq!(screen.owner(), None);
    assert_eq!(screen.input().joystick(), None);
}

#[test]
fn touches_outside_the_corner_are_not_the_joystick() {
    let mut screen = Screen::new();
    screen.touch(1, TouchPhase::Started, 900.0, 100.0);
    screen.touch(1, TouchPhase::Moved, 900.0, 40.0);
    assert_eq!(screen.owner(), None);
    assert_eq!(screen.input().joystick(), None);
}

#[test]
fn releasing_the_stick_keeps_held_keys() {
    let mut screen = Screen::new();
    screen.world.resource_mut::<InputState>().press(Action::Forward);

    screen.touch(2, TouchPhase::Started, 100.0, 700.0);
    screen.touch(2, TouchPhase::Moved, 40.0, 700.0);
    assert!(screen.input().is_held(Action::Left));

    screen.touch(2, TouchPhase::Ended, 40.0, 700.0);
    assert!(!screen.input().is_held(Action::Left));
    assert!(screen.input().is_held(Action::Forward));
}
