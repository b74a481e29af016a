//! Built-in advisory rule table.
//!
//! Order is significant: topics are tried top to bottom and the first one
//! whose trigger terms appear in the utterance wins. Terms are lowercase
//! (Latin) or Devanagari and are matched as plain substrings.

use super::Topic;

pub(super) struct SubRuleDef {
    pub refinements: &'static [&'static str],
    pub response: &'static str,
}

pub(super) struct RuleDef {
    pub topic: Topic,
    pub triggers: &'static [&'static str],
    pub sub_rules: &'static [SubRuleDef],
    pub default_response: &'static str,
}

pub(super) const FALLBACK_RESPONSE: &str = "🤖 I'm your comprehensive financial assistant! I can help with:\n\n🏦 Banking: Account opening, digital banking, ATM usage\n💰 Investments: SIP planning, mutual funds, portfolio advice\n🏠 Loans: EMI calculations, credit scores, loan types\n🎯 Government Schemes: PM-KISAN, Ayushman Bharat, MGNREGA\n💳 Digital Payments: UPI setup, safety tips, best apps\n📊 Financial Planning: Goals, retirement, tax saving\n🛡️ Insurance: Life, health, vehicle coverage\n\nJust ask me anything about money management, and I'll provide detailed, actionable advice! What would you like to explore?";

pub(super) const WELCOME_MESSAGE: &str =
    "Hello! I'm your financial assistant. How can I help you today?";

pub(super) const RULES: &[RuleDef] = &[
    RuleDef {
        topic: Topic::Greeting,
        triggers: &["hello", "hi", "namaste", "नमस्ते"],
        sub_rules: &[],
        default_response: "Hello! I'm your personal financial assistant. I can help you with banking, investments, loans, government schemes, and financial planning. What would you like to know today?",
    },
    RuleDef {
        topic: Topic::Banking,
        triggers: &["bank", "account", "बैंक", "खाता"],
        sub_rules: &[
            SubRuleDef {
                refinements: &["open", "create"],
                response: "To open a bank account, you'll need:\n\n📋 Required Documents:\n• Aadhaar Card (mandatory)\n• PAN Card (for amounts >₹50,000)\n• Address proof (utility bill/rent agreement)\n• Recent photographs\n• Initial deposit (₹500-₹1000)\n\n🏦 Best Banks for Rural Areas:\n• State Bank of India\n• Bank of Baroda\n• Punjab National Bank\n\n💡 Tip: Look for zero-balance accounts like Jan Dhan Yojana!",
            },
            SubRuleDef {
                refinements: &["digital", "online"],
                response: "Digital banking is safe and convenient! Here's how to get started:\n\n📱 Popular Apps:\n• Google Pay, PhonePe, Paytm\n• Your bank's official app\n\n🔐 Safety Tips:\n• Never share OTP with anyone\n• Use only official apps\n• Check transaction details carefully\n• Set spending limits\n\n✅ Benefits: 24/7 access, instant transfers, bill payments, and cashback offers!",
            },
        ],
        default_response: "Banking services I can help with:\n• Opening new accounts\n• Digital banking setup\n• ATM usage guidance\n• Understanding bank statements\n• Choosing the right bank\n\nWhat specific banking question do you have?",
    },
    RuleDef {
        topic: Topic::Investment,
        triggers: &["invest", "sip", "mutual fund", "निवेश"],
        sub_rules: &[
            SubRuleDef {
                refinements: &["start", "begin"],
                response: "Great decision to start investing! Here's your beginner's roadmap:\n\n🎯 Step 1: Emergency Fund\nSave 6 months of expenses first\n\n💰 Step 2: Start SIP\n• Begin with ₹500-1000/month\n• Choose diversified equity funds\n• Use our SIP calculator\n\n📈 Step 3: Increase Gradually\n• Increase SIP by 10-15% annually\n• Add debt funds for stability\n\n⏰ Best Time: Start NOW! Time in market beats timing the market.",
            },
            SubRuleDef {
                refinements: &["sip"],
                response: "SIP (Systematic Investment Plan) is perfect for beginners!\n\n✨ Benefits:\n• Start with just ₹500/month\n• Rupee cost averaging\n• Disciplined investing\n• Power of compounding\n\n📊 Example:\n₹5,000/month for 15 years at 12% returns = ₹25+ lakhs!\n\n🎯 Best SIP Funds:\n• Large cap funds (stable)\n• Multi-cap funds (balanced)\n• ELSS funds (tax saving)\n\nUse our SIP calculator to see your potential returns!",
            },
        ],
        default_response: "Investment guidance I provide:\n• SIP planning and selection\n• Mutual fund recommendations\n• Risk assessment\n• Portfolio diversification\n• Tax-saving investments (ELSS)\n\nWhat's your investment goal and timeline?",
    },
    RuleDef {
        topic: Topic::Loan,
        triggers: &["loan", "emi", "credit", "लोन"],
        sub_rules: &[
            SubRuleDef {
                refinements: &["personal", "home", "car"],
                response: "Loan guidance for smart borrowing:\n\n🏠 Home Loan:\n• Lowest interest rates (6.5-8.5%)\n• Longest tenure (up to 30 years)\n• Tax benefits available\n\n🚗 Car Loan:\n• 7-9% interest rates\n• Up to 7 years tenure\n• Compare bank vs dealer financing\n\n💳 Personal Loan:\n• Higher rates (10-15%)\n• Use only for emergencies\n• Shorter tenure (1-5 years)\n\n💡 Golden Rule: Keep total EMIs under 40% of monthly income!",
            },
            SubRuleDef {
                refinements: &["credit score", "cibil"],
                response: "Credit Score is crucial for loan approval!\n\n📊 Score Ranges:\n• 750-900: Excellent (best rates)\n• 650-749: Good (decent rates)\n• 550-649: Fair (higher rates)\n• Below 550: Poor (difficult approval)\n\n🔧 How to Improve:\n• Pay all bills on time\n• Keep credit utilization <30%\n• Don't close old credit cards\n• Check report annually\n• Avoid multiple loan applications\n\n📱 Check Free: CIBIL, Experian, Equifax websites",
            },
        ],
        default_response: "Loan assistance I provide:\n• EMI calculations\n• Interest rate comparisons\n• Credit score improvement\n• Loan eligibility assessment\n• Documentation guidance\n\nWhat type of loan are you considering?",
    },
    RuleDef {
        topic: Topic::GovernmentScheme,
        triggers: &["scheme", "government", "pm-kisan", "योजना"],
        sub_rules: &[
            SubRuleDef {
                refinements: &["farmer", "agriculture", "pm-kisan"],
                response: "🌾 Top Government Schemes for Farmers:\n\n💰 PM-KISAN:\n• ₹6,000/year direct benefit\n• For all landholding farmers\n• Apply online or at CSC\n\n🚜 PM-KUSUM:\n• Solar pump subsidies\n• Up to 90% subsidy\n• Reduces electricity costs\n\n🌱 Soil Health Card:\n• Free soil testing\n• Fertilizer recommendations\n• Increases crop yield\n\n📱 Apply through: PM-KISAN portal, CSC centers, or bank branches",
            },
            SubRuleDef {
                refinements: &["health", "ayushman"],
                response: "🏥 Health Schemes for Rural Families:\n\n💊 Ayushman Bharat:\n• ₹5 lakh health insurance\n• Covers 50 crore people\n• Cashless treatment\n• 1,400+ procedures covered\n\n👶 Janani Suraksha Yojana:\n• Cash assistance for delivery\n• ₹1,400 in rural areas\n• Promotes institutional delivery\n\n🔍 Check Eligibility:\n• Visit nearest PHC\n• Use Ayushman Bharat app\n• Call 14555 helpline",
            },
        ],
        default_response: "Popular Government Schemes:\n• PM-KISAN (₹6,000/year for farmers)\n• Ayushman Bharat (₹5 lakh health cover)\n• MGNREGA (100 days work guarantee)\n• PM Awas Yojana (housing assistance)\n• Sukanya Samriddhi (girl child savings)\n\nWhich scheme interests you most?",
    },
    RuleDef {
        topic: Topic::Savings,
        triggers: &["save", "saving", "बचत"],
        sub_rules: &[SubRuleDef {
            refinements: &["emergency", "fund"],
            response: "Emergency Fund is your financial safety net!\n\n🎯 Target Amount:\n• 6 months of monthly expenses\n• Keep in liquid investments\n• Easily accessible\n\n💰 Where to Keep:\n• Savings account (instant access)\n• Liquid mutual funds (better returns)\n• Fixed deposits (stable but locked)\n\n📈 Building Strategy:\n• Start with ₹500/month\n• Automate transfers\n• Use windfalls (bonus, gifts)\n• Don't touch unless emergency!",
        }],
        default_response: "Smart Saving Strategies:\n\n📊 50-30-20 Rule:\n• 50% for needs (rent, food)\n• 30% for wants (entertainment)\n• 20% for savings & investments\n\n🏦 Best Saving Options:\n• High-yield savings accounts\n• Fixed deposits for goals\n• PPF for long-term (15 years)\n• ELSS for tax saving\n\n💡 Pro Tip: Automate your savings - pay yourself first!",
    },
    RuleDef {
        topic: Topic::DigitalPayment,
        triggers: &["upi", "digital", "payment", "gpay"],
        sub_rules: &[],
        default_response: "🚀 Digital Payments Made Easy!\n\n📱 Popular UPI Apps:\n• Google Pay (GPay)\n• PhonePe\n• Paytm\n• BHIM (government app)\n\n🔧 Setup Process:\n1. Download official app\n2. Verify mobile number\n3. Add bank account\n4. Set UPI PIN\n5. Start transacting!\n\n🛡️ Safety Tips:\n• Never share UPI PIN/OTP\n• Verify recipient before sending\n• Check transaction limits\n• Use only trusted WiFi\n\n💰 Benefits: Instant transfers, bill payments, merchant payments, and cashback!",
    },
    RuleDef {
        topic: Topic::Tax,
        triggers: &["tax", "income tax", "कर"],
        sub_rules: &[],
        default_response: "💰 Tax Saving Made Simple!\n\n📋 Section 80C (₹1.5 lakh limit):\n• ELSS mutual funds\n• PPF (15-year lock-in)\n• Life insurance premiums\n• Home loan principal\n\n🏥 Section 80D (Health Insurance):\n• ₹25,000 for self/family\n• ₹50,000 for senior parents\n\n📚 Section 80E (Education Loan):\n• Full interest deduction\n• No upper limit\n\n💡 Best Strategy: Start ELSS SIP for tax saving + wealth creation!",
    },
    RuleDef {
        topic: Topic::Insurance,
        triggers: &["insurance", "बीमा"],
        sub_rules: &[],
        default_response: "🛡️ Essential Insurance for Financial Security:\n\n❤️ Life Insurance:\n• Term insurance (cheapest)\n• 10-15x annual income coverage\n• Online policies are cheaper\n\n🏥 Health Insurance:\n• Minimum ₹5 lakh coverage\n• Family floater plans\n• Check hospital network\n\n🚗 Vehicle Insurance:\n• Third-party mandatory\n• Comprehensive recommended\n• Compare online for best rates\n\n🌾 Crop Insurance:\n• PM Fasal Bima Yojana\n• Protects against crop loss\n• Low premium, high coverage",
    },
    RuleDef {
        topic: Topic::Retirement,
        triggers: &["retirement", "pension", "old age"],
        sub_rules: &[],
        default_response: "🏖️ Retirement Planning Essentials:\n\n🎯 Target Corpus:\n• 25-30x annual expenses\n• Start early for compound magic\n• Review and adjust regularly\n\n💰 Best Retirement Options:\n• PPF (tax-free returns)\n• ELSS mutual funds\n• NPS (National Pension System)\n• Equity mutual funds\n\n📊 Example:\n₹10,000/month SIP for 30 years at 12% = ₹3+ crores!\n\n⏰ Golden Rule: Start NOW, even with small amounts!",
    },
    RuleDef {
        topic: Topic::GoalPlanning,
        triggers: &["goal", "planning", "future"],
        sub_rules: &[],
        default_response: "🎯 Smart Financial Goal Planning:\n\n📝 Types of Goals:\n• Short-term (1-3 years): Emergency fund, vacation\n• Medium-term (3-7 years): Car, house down payment\n• Long-term (7+ years): Retirement, children's education\n\n💡 SMART Goals Framework:\n• Specific: Clear target amount\n• Measurable: Track progress\n• Achievable: Realistic timeline\n• Relevant: Important to you\n• Time-bound: Set deadline\n\n🔧 Tools to Use:\n• Our SIP calculator\n• Goal-based mutual funds\n• Systematic planning",
    },
];
