use std::time::Duration;

use automata_sim_lib::{
    automaton::MachineKind,
    catalog::Catalog,
    config::{PlaybackConfig, ValidatorConfig},
    playback::PlaybackController,
    validation::ValidationSession,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let catalog = Catalog::builtin()?;

    batch_demo(&catalog)?;
    // graphviz_demo(&catalog)?;
    playback_demo(&catalog)?;

    Ok(())
}

fn batch_demo(catalog: &Catalog) -> anyhow::Result<()> {
    let sample = catalog.sample(1).ok_or_else(|| anyhow::anyhow!("no sample 1"))?;

    let session = ValidationSession::new(&sample.dfa, ValidatorConfig::default());
    let results = session.validate_batch("111111011\n10101\n\n000")?;

    for result in &results {
        println!(
            "{:>12}  {}",
            result.input,
            if result.outcome.accepted() {
                "accepted"
            } else {
                "rejected"
            }
        );
    }

    Ok(())
}

#[allow(dead_code)]
fn graphviz_demo(catalog: &Catalog) -> anyhow::Result<()> {
    let sample = catalog.sample(2).ok_or_else(|| anyhow::anyhow!("no sample 2"))?;

    println!("{}", sample.machine(MachineKind::Pda).to_graphviz(Some("Read6"), "yellow"));

    Ok(())
}

fn playback_demo(catalog: &Catalog) -> anyhow::Result<()> {
    let sample = catalog.sample(1).ok_or_else(|| anyhow::anyhow!("no sample 1"))?;
    let dfa = sample
        .dfa
        .as_dfa()
        .ok_or_else(|| anyhow::anyhow!("sample 1 has no DFA"))?;

    let run = dfa.run("111111011");
    println!("accepted: {}", run.accepted);

    let mut controller =
        PlaybackController::new(&PlaybackConfig::default().with_tick_interval(Duration::from_millis(200)));
    controller.on_state_change(|state| match state {
        Some(state) => println!("  at {state}"),
        None => println!("  (stopped)"),
    });

    controller.start(run.trace);
    controller.play();
    std::thread::sleep(Duration::from_millis(800));
    controller.pause();
    controller.step_forward();
    controller.step_forward();
    controller.step_backward();
    controller.play();
    std::thread::sleep(Duration::from_secs(2));
    controller.stop();

    Ok(())
}
