//! Interactive loop: stdin commands in, client updates out.

use campusloop_client::{CampusClient, ClientUpdate, ErrandDraft, PlanPhase};
use campusloop_common::{BuildingId, CampusError, ErrandId, Notice, NoticeLevel};
use campusloop_map::PickOutcome;
use campusloop_sync::ChannelStatus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::console::{self, ConsoleCommand, ConsoleError, HELP};

pub async fn run(mut client: CampusClient) -> Result<(), CampusError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                match console::parse(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => execute(&mut client, command),
                    Err(ConsoleError::Empty) => {}
                    Err(e) => println!("{e}"),
                }
            }
            update = client.next_event() => report(&client, &update),
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }

        for notice in client.take_notices() {
            print_notice(&notice);
        }
    }

    client.shutdown();
    Ok(())
}

fn execute(client: &mut CampusClient, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Plan => {
            client.enter_planning();
            println!("planning a route: pick a start and an end");
        }
        ConsoleCommand::Errand(category) => {
            client.enter_errand(category);
            println!("requesting a {category} errand: pick pickup and dropoff");
        }
        ConsoleCommand::Pick(id) => pick(client, BuildingId(id)),
        ConsoleCommand::Exit => client.exit_mode(),
        ConsoleCommand::Submit(title) => {
            let result = if client.selection().is_planning() {
                client.submit_plan()
            } else if client.selection().is_requesting_errand() {
                client.submit_errand(ErrandDraft {
                    title,
                    ..ErrandDraft::default()
                })
            } else {
                println!("nothing to submit, start with `plan` or `errand`");
                return;
            };
            match result {
                Ok(()) => println!("submitted"),
                Err(e) => println!("cannot submit: {e}"),
            }
        }
        ConsoleCommand::Complete(id) => client.complete_errand(ErrandId::new(id)),
        ConsoleCommand::Cancel(id) => client.cancel_errand(ErrandId::new(id)),
        ConsoleCommand::Chat(id) => client.open_chat(ErrandId::new(id)),
        ConsoleCommand::Say(text) => {
            if let Err(e) = client.send_chat(text) {
                println!("cannot send: {e}");
            }
        }
        ConsoleCommand::Sos { active, message } => client.trigger_emergency(active, message),
        ConsoleCommand::Reconfigure => {
            let generation = client.reconfigure();
            println!("layout regenerated (generation {generation}), selections cleared");
        }
        ConsoleCommand::Clear => client.clear_route(),
        ConsoleCommand::Status => print_status(client),
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => {}
    }
}

fn pick(client: &mut CampusClient, id: BuildingId) {
    match client.pick(id) {
        Ok(PickOutcome::Selected) => {
            if let Some(b) = client.layout().get(id) {
                println!(
                    "{} #{}: {}, {:?}, {}% occupied",
                    b.name,
                    b.id,
                    b.kind.label(),
                    b.status,
                    b.occupancy
                );
            }
        }
        Ok(outcome) => {
            let mode = client.selection().mode();
            println!("{outcome:?} -> {mode:?}");
            if client.selection().is_submittable() {
                println!("ready, `submit` to send");
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn report(client: &CampusClient, update: &ClientUpdate) {
    match update {
        ClientUpdate::Channel(ChannelStatus::Connected) => println!("[live] connected"),
        ClientUpdate::Channel(ChannelStatus::Disconnected) => {
            println!("[live] disconnected, reconnecting")
        }
        ClientUpdate::Errands => println!("[errands] {} pending", client.errands().len()),
        ClientUpdate::Plan(PlanPhase::Revealed) => {
            println!("[plan] {} matches along your route", client.matches().len());
            for m in client.matches() {
                println!(
                    "  {}  {} ({}, {:.1} credits) detour {:.0} m",
                    m.errand.id, m.errand.title, m.errand.category, m.errand.reward_estimate, m.detour
                );
            }
        }
        ClientUpdate::Plan(PlanPhase::Failed(_)) => {}
        ClientUpdate::Plan(phase) => println!("[plan] {}", phase.label()),
        ClientUpdate::ErrandPosted(id) => println!("[errands] posted {id}"),
        ClientUpdate::Chat => {
            if let Some(m) = client.chat().messages().last() {
                println!("[chat] {}: {}", m.sender_id, m.content);
            }
        }
        ClientUpdate::Emergency => {
            let state = client.emergency().snapshot();
            if state.active {
                let at = state
                    .target
                    .and_then(|id| client.layout().get(id))
                    .map(|b| format!(" at {}", b.name))
                    .unwrap_or_default();
                println!("[EMERGENCY]{at}: {}", state.message);
            } else {
                println!("[emergency] cleared");
            }
        }
        ClientUpdate::Profile => {
            if let Some(p) = client.profile() {
                println!("[profile] {} credits, {} xp, rank {}", p.credits, p.xp, p.rank);
            }
        }
        ClientUpdate::Notice | ClientUpdate::Nothing => {}
    }
}

fn print_notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    println!("[{tag}] {}: {}", notice.title, notice.body);
}

fn print_status(client: &CampusClient) {
    let layout = client.layout();
    println!(
        "connected: {}  user: {}",
        client.is_connected(),
        client.identity().map(|u| u.as_str()).unwrap_or("-")
    );
    println!(
        "layout: generation {}, {} buildings",
        layout.generation(),
        layout.len()
    );
    println!("mode: {:?}", client.selection().mode());
    if let Some(id) = client.selection().selected_building() {
        println!("selected: {id}");
    }
    println!("plan: {}", client.plan_phase().label());
    println!("pending errands: {}", client.errands().len());
    for e in client.errands().iter().take(10) {
        println!("  {}  {} ({})", e.id, e.title, e.category);
    }
    let emergency = client.emergency();
    println!(
        "emergency: {}{}",
        if emergency.is_active() { "ACTIVE" } else { "clear" },
        match emergency.awaiting_broadcast() {
            Some(_) => " (request sent)",
            None => "",
        }
    );
    if let Some(errand) = client.chat().bound() {
        println!("chat: {errand}, {} messages", client.chat().messages().len());
    }
}
