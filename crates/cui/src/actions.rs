use crate::app::App;
use crate::input::InputAction;
use lootflip_core::Side;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::FlipLeft => app.flip(Side::Left),
        InputAction::FlipRight => app.flip(Side::Right),
        InputAction::Bank => app.bank(),
        InputAction::Restart => app.restart(),
    }
}
