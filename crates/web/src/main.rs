use lootflip_core::{
    bank_points, Event, EventBus, GameConfig, Phase, RunState, Side, SlotKind, TrophyTier,
    TurnResult,
};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};

const RUN_SEED: u64 = 0xC0FFEE;

fn main() {
    let server = Server::http("0.0.0.0:7878").expect("start server");
    println!("Lootflip web server on http://localhost:7878");
    let state = Arc::new(Mutex::new(AppState::new()));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            eprintln!("request error: {err}");
        }
    }
}

struct AppState {
    run: RunState,
    events: EventBus,
}

impl AppState {
    fn new() -> Self {
        let mut run = RunState::new(GameConfig::default(), RUN_SEED);
        let mut events = EventBus::default();
        let _ = run.start_next_turn(&mut events);
        Self { run, events }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: UiState,
    events: Vec<Event>,
    result: Option<TurnResult>,
}

#[derive(Serialize)]
struct UiState {
    lives: u32,
    total_score: u32,
    turns_left: u32,
    max_turns: u32,
    streak: u32,
    uniques: Vec<u8>,
    has_shield: bool,
    scrambler_charges: u8,
    jammer_turns: u32,
    left_slot: SlotKind,
    right_slot: SlotKind,
    phase: Phase,
    pot: u32,
    can_bank: bool,
    trophy_tier: TrophyTier,
    last_event: Option<String>,
}

#[derive(Deserialize)]
struct ActionRequest {
    action: String,
    #[serde(default)]
    side: Option<String>,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    match (request.method(), url.as_str()) {
        (&Method::Get, "/") => {
            let body = "lootflip: GET /api/state | POST /api/action \
                        {\"action\":\"flip|bank|next|restart\",\"side\":\"left|right\"}\n";
            request.respond(Response::from_string(body))?;
        }
        (&Method::Get, "/api/state") => {
            let mut guard = state.lock().unwrap();
            let response = build_response(&mut guard, None, None);
            respond_json(request, response)?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let action: ActionRequest = serde_json::from_str(&body)?;
            let mut guard = state.lock().unwrap();
            let (err, result) = apply_action(&mut guard, action);
            let response = build_response(&mut guard, err, result);
            respond_json(request, response)?;
        }
        _ => {
            request.respond(Response::empty(StatusCode(404)))?;
        }
    }
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    response: ApiResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header");
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}

fn apply_action(
    state: &mut AppState,
    action: ActionRequest,
) -> (Option<String>, Option<TurnResult>) {
    let outcome = match action.action.as_str() {
        "flip" => {
            let Some(side) = action.side.as_deref().and_then(parse_side) else {
                return (Some("flip needs side=left|right".to_string()), None);
            };
            state.run.flip(side, &mut state.events)
        }
        "bank" => state.run.bank(&mut state.events),
        "next" => state.run.start_next_turn(&mut state.events),
        "restart" => {
            state.run.restart();
            state.run.start_next_turn(&mut state.events)
        }
        other => return (Some(format!("unknown action '{other}'")), None),
    };
    match outcome {
        Ok(result) => (None, Some(result)),
        Err(err) => (Some(err.to_string()), None),
    }
}

fn parse_side(value: &str) -> Option<Side> {
    match value {
        "left" | "l" => Some(Side::Left),
        "right" | "r" => Some(Side::Right),
        _ => None,
    }
}

fn build_response(
    state: &mut AppState,
    error: Option<String>,
    result: Option<TurnResult>,
) -> ApiResponse {
    let events: Vec<_> = state.events.drain().collect();
    ApiResponse {
        ok: error.is_none(),
        error,
        state: snapshot_state(&state.run),
        events,
        result,
    }
}

fn snapshot_state(run: &RunState) -> UiState {
    let state = &run.state;
    UiState {
        lives: state.lives,
        total_score: state.total_score,
        turns_left: state.turns_left,
        max_turns: state.max_turns,
        streak: state.streak,
        uniques: state.uniques.iter().copied().collect(),
        has_shield: state.has_shield,
        scrambler_charges: state.scrambler_charges,
        jammer_turns: state.jammer_turns,
        left_slot: state.left_slot,
        right_slot: state.right_slot,
        phase: state.phase,
        pot: bank_points(&run.config.bank_table, state.unique_count()),
        can_bank: run.can_bank(),
        trophy_tier: run.trophy_tier(),
        last_event: state.last_event.clone(),
    }
}
