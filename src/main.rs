use booking_cascade::core::{form::QueryOutcome, ConfigProvider};
use booking_cascade::utils::{logger, validation::Validate};
use booking_cascade::{
    BookingForm, CascadeController, CascadeError, CliConfig, HttpBookingApi, Messages,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting booking-cascade CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let api = match HttpBookingApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => fail(&e),
    };

    let form = BookingForm::new(Messages::for_locale(config.locale()))
        .with_professionals(config.professionals.clone());
    let mut controller = CascadeController::with_form(api, form);

    let outcome = controller.on_professional_changed(&cli.professional).await;
    tracing::info!("Professional changed: {:?}", outcome);

    let outcome = controller.on_date_changed(&cli.date).await;
    tracing::info!("Date changed: {:?}", outcome);
    if let Some(QueryOutcome::Failed(kind)) = outcome.slots {
        tracing::warn!("⚠️ Slots could not be loaded ({:?})", kind);
    }

    if let Some(service) = &cli.service {
        if let Err(e) = controller.select_service(service) {
            fail(&e);
        }
    }
    if let Some(time) = &cli.time {
        if let Err(e) = controller.select_time(time) {
            fail(&e);
        }
    }

    let form = controller.form();
    if cli.json {
        let output = serde_json::json!({
            "form": form.snapshot(),
            "booking": form.booking_request(),
        });
        match serde_json::to_string_pretty(&output).map_err(CascadeError::from) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e),
        }
    } else {
        print!("{}", form.professional());
        println!("date: {}", form.date());
        print!("{}", form.service());
        print!("{}", form.time());

        match form.booking_request() {
            Some(booking) => println!(
                "✅ Ready to book: professional {} / service {} on {} at {}",
                booking.professional_id, booking.service_id, booking.date, booking.time
            ),
            None => println!("⏳ Booking incomplete"),
        }
    }

    Ok(())
}

fn fail(e: &CascadeError) -> ! {
    tracing::error!("❌ {} (Kind: {:?})", e, e.kind());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
