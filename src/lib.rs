//! Crate root module declarations for the Plum Board interactive chess board.
//!
//! This file exposes the subsystems (game state, rules and move generation,
//! the game controller, annotations, pointer interaction, view transform,
//! settings and text utilities) so the console driver, tests and a graphical
//! shell can import stable module paths.

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_status;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod move_generator;
    pub mod perft;
}

pub mod game_controller {
    pub mod game_controller;
    pub mod move_feedback;
}

pub mod annotations {
    pub mod annotation_store;
}

pub mod interaction {
    pub mod interaction_state;
    pub mod modifiers;
    pub mod state_machine;
}

pub mod view {
    pub mod view_transform;
}

pub mod settings {
    pub mod board_settings;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
    pub mod san;
}
