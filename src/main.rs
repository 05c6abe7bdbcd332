//! Line-oriented console shell around the board core.
//!
//! Run with:
//! `cargo run -- [settings.toml]`
//! `RUST_LOG=plum_board=debug cargo run`
//!
//! Commands name squares instead of pixels; each one is converted to the
//! pointer position of that square's center in the current view.

use std::io::{self, BufRead, Write};

use plum_board::game_state::board_state::BoardState;
use plum_board::game_state::chess_types::PieceKind;
use plum_board::interaction::interaction_state::{BoardKey, PointerButton, PointerEvent, ShellRequest};
use plum_board::interaction::modifiers::Modifiers;
use plum_board::interaction::state_machine::InteractionStateMachine;
use plum_board::settings::board_settings::BoardSettings;
use plum_board::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use plum_board::utils::render_game_state::render_game_state;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
down <sq> | up <sq> | drag <sq>   primary button press, release, pointer move
rdown <sq> | rup <sq>             secondary button press, release
click <from> <to>                 press and release on both squares
mods <ctrl+shift|none>            set held modifier keys
key <left|right|up|down|x|r|c|l|h|s|f|f11|escape|n>
choose <queen|rook|bishop|knight> pick from the promotion menu
set <option> <value>              change a setting
fen <fen>                         load a position
show | moves | status | help | quit";

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|err| format!("{path}: {err}"))?;
            BoardSettings::from_toml_str(&text).map_err(|err| format!("{path}: {err}"))?
        }
        None => BoardSettings::default(),
    };
    info!(?settings, "starting board");

    let mut machine = InteractionStateMachine::new(settings).map_err(|err| err.to_string())?;
    println!("{}", render_game_state(machine.board(), machine.view(), machine.annotations()));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|err| err.to_string())?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match run_command(&mut machine, line) {
            Ok(requests) => {
                for request in requests {
                    println!("{}", describe_request(request));
                }
            }
            Err(err) => {
                warn!(command = line, "{err}");
                println!("error: {err}");
            }
        }
        io::stdout().flush().ok();
    }

    Ok(())
}

fn run_command(machine: &mut InteractionStateMachine, line: &str) -> Result<Vec<ShellRequest>, String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let requests = match command {
        "down" => pointer(machine, rest, |x, y| PointerEvent::Down {
            button: PointerButton::Primary,
            x,
            y,
        })?,
        "up" => pointer(machine, rest, |x, y| PointerEvent::Up {
            button: PointerButton::Primary,
            x,
            y,
        })?,
        "drag" => pointer(machine, rest, |x, y| PointerEvent::Move { x, y })?,
        "rdown" => pointer(machine, rest, |x, y| PointerEvent::Down {
            button: PointerButton::Secondary,
            x,
            y,
        })?,
        "rup" => pointer(machine, rest, |x, y| PointerEvent::Up {
            button: PointerButton::Secondary,
            x,
            y,
        })?,
        "click" => {
            let (from, to) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: click <from> <to>".to_owned())?;
            let mut requests = Vec::new();
            for (square, button_down) in [(from, true), (from, false), (to.trim(), true), (to.trim(), false)] {
                requests.extend(pointer(machine, square, |x, y| {
                    if button_down {
                        PointerEvent::Down {
                            button: PointerButton::Primary,
                            x,
                            y,
                        }
                    } else {
                        PointerEvent::Up {
                            button: PointerButton::Primary,
                            x,
                            y,
                        }
                    }
                })?);
            }
            requests
        }
        "mods" => {
            let mods = Modifiers::parse_combo(rest).ok_or_else(|| format!("unknown modifiers '{rest}'"))?;
            machine.set_modifiers(mods);
            Vec::new()
        }
        "key" => {
            let key = BoardKey::from_name(rest).ok_or_else(|| format!("unknown key '{rest}'"))?;
            machine.handle_key(key)
        }
        "choose" => {
            let piece = PieceKind::from_name(rest).ok_or_else(|| format!("unknown piece '{rest}'"))?;
            machine.choose_promotion(piece)
        }
        "set" => {
            let (name, value) = rest
                .rsplit_once(' ')
                .ok_or_else(|| "usage: set <option> <value>".to_owned())?;
            let mut settings = machine.settings().clone();
            settings.set_option(name, value).map_err(|err| err.to_string())?;
            machine.apply_settings(settings).map_err(|err| err.to_string())?;
            Vec::new()
        }
        "fen" => {
            let board = BoardState::from_fen(rest).map_err(|err| err.to_string())?;
            machine.set_position(board).map_err(|err| err.to_string())?;
            Vec::new()
        }
        "show" => {
            println!("{}", render_game_state(machine.board(), machine.view(), machine.annotations()));
            println!("state: {}", machine.state().name());
            for (square, piece) in machine.promotion_menu() {
                println!("menu {} {:?}", square_to_algebraic(square), piece);
            }
            Vec::new()
        }
        "moves" => {
            println!("{}", machine.controller().move_list());
            Vec::new()
        }
        "status" => {
            let status = machine.controller().status().map_err(|err| err.to_string())?;
            println!("{status:?}, {} to move", format!("{:?}", machine.board().side_to_move).to_lowercase());
            Vec::new()
        }
        "help" => {
            println!("{HELP}");
            Vec::new()
        }
        _ => return Err(format!("unknown command '{command}', try 'help'")),
    };

    Ok(requests)
}

fn pointer(
    machine: &mut InteractionStateMachine,
    square: &str,
    event: impl Fn(f32, f32) -> PointerEvent,
) -> Result<Vec<ShellRequest>, String> {
    let square = algebraic_to_square(square).map_err(|err| err.to_string())?;
    let (x, y) = machine.view().square_center_px(square);
    Ok(machine.handle_pointer(event(x, y)))
}

fn describe_request(request: ShellRequest) -> String {
    match request {
        ShellRequest::PlaySound { sound, game_over } => {
            if game_over {
                format!("sound {sound:?} (game over)")
            } else {
                format!("sound {sound:?}")
            }
        }
        ShellRequest::FlashIllegal { square } => format!("flash king on {}", square_to_algebraic(square)),
        ShellRequest::OpenHelp => HELP.to_owned(),
        ShellRequest::OpenSettings => "settings dialog requested".to_owned(),
        ShellRequest::ToggleFullscreen => "fullscreen toggled".to_owned(),
        ShellRequest::ExitFullscreen => "fullscreen exited".to_owned(),
    }
}
