use certkeeper::adapters::api::IssuanceClient;
use certkeeper::adapters::store::LocalArtifactStore;
use certkeeper::adapters::time_providers::{ApihzTime, WorldClockApi, WorldTimeApi};
use certkeeper::core::orchestrator::RunOutcome;
use certkeeper::utils::{logger, validation::Validate};
use certkeeper::{AppConfig, CliArgs, RenewalOrchestrator, TimeResolver};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting certkeeper");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let loaded = match AppConfig::load_or_init(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if loaded.newly_created {
        println!(
            "Created default configuration at {}",
            args.config.display()
        );
        println!("Fill in your credentials and target mark, then run again.");
        return;
    }
    tracing::info!("Configuration loaded from {}", args.config.display());

    let mut config = loaded.config;
    if let Some(mark) = args.mark {
        config.target_mark = mark;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let api = match IssuanceClient::new(
        &config.api_url,
        &config.username,
        &config.token,
        config.is_path,
        config.timeout(),
    ) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // Declared order is the priority order; first success wins.
    let http = reqwest::Client::new();
    let resolver = TimeResolver::new(vec![
        Box::new(WorldTimeApi::new(http.clone())),
        Box::new(WorldClockApi::new(http.clone())),
        Box::new(ApihzTime::new(
            http,
            config.apihz_id.clone(),
            config.apihz_key.clone(),
        )),
    ]);

    let store = LocalArtifactStore::new(config.output_dir.clone());
    let orchestrator = RenewalOrchestrator::new(
        api,
        store,
        resolver,
        config.target_mark.clone(),
        config.renew_threshold(),
        config.courtesy_pause(),
    );

    match orchestrator.run().await {
        Ok(RunOutcome::Skipped { remaining }) => {
            println!(
                "✅ Certificate '{}' has {} days {} hours left; nothing to do.",
                config.target_mark,
                remaining.num_days(),
                remaining.num_hours() % 24
            );
        }
        Ok(RunOutcome::Renewed { paths }) => {
            println!("✅ Certificate '{}' renewed.", config.target_mark);
            println!("📁 Chain: {}", paths.full_chain.display());
            println!("📁 Key:   {}", paths.private_key.display());
        }
        Err(e) => {
            tracing::error!("❌ Renewal run failed: {} (retryable: {})", e, e.is_retryable());
            eprintln!("❌ {}", e);
            if e.is_retryable() {
                eprintln!("💡 The next scheduled run will try again.");
            }
            std::process::exit(e.exit_code());
        }
    }
}
