use tracing::info;
use vitt_mukti::{
    auth::{AuthService, InMemoryAuthService},
    calculator::{compute_investment_growth, compute_loan_emi, compute_sip, format_inr},
    chat::ChatSession,
    learning::{self, InMemoryProgressStore},
    models::{InvestmentParameters, LoanParameters, RegisterRequest, SipParameters},
    responder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Vitt Mukti demo run starting");

    // Calculators
    let sip = compute_sip(&SipParameters {
        monthly_amount: 5000.0,
        annual_return_percent: 12.0,
        years: 15,
    })?;
    let loan = compute_loan_emi(&LoanParameters {
        principal: 500_000.0,
        annual_rate_percent: 8.5,
        tenure_years: 20,
    })?;
    let investment = compute_investment_growth(&InvestmentParameters {
        initial_amount: 100_000.0,
        monthly_contribution: 5000.0,
        annual_return_percent: 10.0,
        years: 15,
    })?;

    println!("\n=== CALCULATORS ===");
    println!(
        "SIP ₹5,000/month, 12%, 15y → {} (invested {}, returns {})",
        format_inr(sip.future_value),
        format_inr(sip.total_investment),
        format_inr(sip.total_returns)
    );
    println!(
        "Loan ₹5,00,000, 8.5%, 20y → EMI {} (total {}, interest {})",
        format_inr(loan.monthly_payment),
        format_inr(loan.total_payable),
        format_inr(loan.total_interest)
    );
    println!(
        "Investment ₹1,00,000 + ₹5,000/month, 10%, 15y → {}",
        format_inr(investment.future_value)
    );

    // Chat
    let mut session = ChatSession::with_welcome(responder::welcome_message());
    for utterance in ["नमस्ते", "I want to open a bank account", "tell me about sip"] {
        session.submit(utterance, responder::default_selector());
    }

    println!("\n=== CHAT ===");
    for message in session.messages() {
        println!("[{}] {}: {}", message.id, message.sender, message.text);
    }

    // Learning progress for a demo user
    let auth = InMemoryAuthService::new();
    let session = auth
        .register(RegisterRequest {
            name: "Demo Learner".to_string(),
            email: "demo@vittmukti.local".to_string(),
            password: "demo".to_string(),
            village: None,
            phone: None,
        })
        .await?;
    let user = &session.user;

    let store = InMemoryProgressStore::new();
    let module = learning::find_module_or_first(1);
    learning::record_step_completion(&store, &user.id, module, 0).await?;
    let progress = learning::record_step_completion(&store, &user.id, module, 1).await?;

    println!("\n=== LEARNING ===");
    println!(
        "{} → {}% ({} of {} steps), next step: {}",
        module.title,
        progress.progress_percent,
        progress.completed_steps,
        module.total_steps(),
        module.steps[progress.next_step_index(module.total_steps())].title
    );

    auth.logout(&session.token).await;
    Ok(())
}
