//! Prompt construction for each research flow.
//!
//! Each builder renders a form into the full natural-language task the
//! model receives, ending with the JSON output requirement and the
//! language directive. The schema skeletons the model is asked to fill
//! live as constants so tests can pin the field names the normalizers
//! depend on.

use super::forms::{
    BuyerInquiry, CreatorFilters, Language, LogisticsForm, MarketResearchForm, TradeInquiry,
};

/// Builds the go-to-market analysis prompt.
pub fn market_analysis_prompt(form: &MarketResearchForm, language: Language) -> String {
    let mut prompt = format!(
        "Act as a Chief Marketing Officer (CMO) and Senior Market Strategist specializing in the {} market.\n\n",
        form.market
    );

    prompt.push_str("**Client Profile:**\n");
    prompt.push_str(&format!(
        "- **Company:** {} ({})\n",
        form.company_name, form.company_type
    ));
    prompt.push_str(&format!(
        "- **Website:** {}\n",
        form.company_website.as_deref().unwrap_or("N/A")
    ));
    prompt.push_str(&format!("- **Product:** {}\n", form.product_name));
    prompt.push_str(&format!(
        "- **Target Audience:** {}\n",
        form.target_audience.as_deref().unwrap_or("General Consumers")
    ));
    prompt.push_str(&format!(
        "- **Key Selling Points (USPs):** {}\n",
        form.usps.as_deref().unwrap_or("Standard market features")
    ));
    prompt.push_str(&format!(
        "- **Price Positioning:** {}\n\n",
        form.price_range.as_deref().unwrap_or("Market Standard")
    ));

    prompt.push_str(&format!(
        "**Objective:**\n\
         Analyze the product images and provided data to create a comprehensive Go-to-Market strategy.\n\
         Use **Google Search** to find REAL-TIME data on competitors, pricing, and trends.\n\n\
         **Tasks:**\n\
         1. **Visual Analysis:** Assess the product image quality, packaging, and appeal for the {market} market.\n\
         2. **Competitor Reconnaissance:** Find 5 *actual* top competitors selling similar products on Amazon, Google Shopping, or major retailers in {market}. Get their *current* selling prices and key features.\n\
         3. **Strategic Deep Dive:**\n   \
            - **Consumer Sentiment:** What do people typically love/hate about this product category? (Look for review summaries).\n   \
            - **Marketing Channels:** Where does the target audience hang out? (e.g., TikTok, Instagram, LinkedIn, Pinterest).\n   \
            - **Pricing Strategy:** Based on the competitors, where should this product be priced to succeed?\n   \
            - **6-Month Action Plan:** Bullet points for a launch roadmap.\n\n",
        market = form.market
    ));

    prompt.push_str("**Output Requirement:**\n");
    prompt.push_str("Return a VALID JSON object. Do not include markdown formatting outside the JSON.\n");
    prompt.push_str(market_language_line(language));
    prompt.push_str("\n\nSchema:\n");
    prompt.push_str(MARKET_ANALYSIS_SCHEMA);
    prompt
}

/// Builds the freight estimate prompt.
pub fn logistics_prompt(form: &LogisticsForm, language: Language) -> String {
    let mut prompt = String::from("Act as a Logistics Expert for international trade.\n\n");

    prompt.push_str(&format!(
        "Product Dimensions: Length {}cm, Width {}cm, Height {}cm.\n",
        form.length_cm, form.width_cm, form.height_cm
    ));
    if let Some(weight) = form.weight_kg {
        prompt.push_str(&format!("Product Weight: {}kg.\n", weight));
    }
    if let Some(units) = form.units_per_cbm {
        prompt.push_str(&format!("Units per CBM: {}.\n", units));
    }
    prompt.push_str(&format!("Target Market: {}.\n", form.market));
    prompt.push_str(&format!(
        "Origin: Assume shipment from a major port in China (e.g., Shenzhen/Shanghai) to {}.\n\n",
        form.market
    ));

    prompt.push_str(&format!(
        "Task:\n\
         1. Calculate the Volumetric Weight.\n\
         2. Estimate current SEA FREIGHT costs (LCL). Provide a cost range per CBM and an estimated cost per unit.\n\
         3. Estimate current AIR FREIGHT costs. Provide a cost range per KG and an estimated cost per unit.\n\
         4. Provide professional logistics advice for this product type (e.g. packaging tips to save volume, incoterms advice).\n\
         5. Use Google Search to recommend 1-2 popular and reputable Overseas Warehouses (3PL) in {} (names only).\n\n",
        form.market
    ));

    prompt.push_str("Output Requirement:\n");
    prompt.push_str("You MUST return a valid JSON object wrapped in ```json code blocks.\n");
    prompt.push_str(logistics_language_line(language));
    prompt.push_str("\n\nStructure:\n");
    prompt.push_str(LOGISTICS_SCHEMA);
    prompt
}

/// Builds the offline trade market scoring prompt.
pub fn trade_evaluation_prompt(inquiry: &TradeInquiry, language: Language) -> String {
    let mut prompt = String::from(
        "Act as an International Trade Consultant specializing in offline/physical retail markets.\n\n",
    );

    prompt.push_str(&format!("Target Market: {}\n", inquiry.country));
    prompt.push_str(&format!("Niche/Product Category: \"{}\"\n\n", inquiry.niche));

    prompt.push_str(
        "Task:\n\
         Evaluate the potential of this niche in the OFFLINE (Brick and Mortar) market of the target country.\n\
         Provide scores from 1 to 10 for the following metrics:\n\
         1. Offline Market Match (How well does this product fit physical retail in this country?)\n\
         2. Offline Market Demand (How high is the consumer demand in physical stores?)\n\
         3. Offline Market Development/Maturity (How developed is the supply chain/retail infrastructure for this niche? 10 = Highly developed/Easy to enter, 1 = Underdeveloped/Difficult).\n\n",
    );

    prompt.push_str("Output Requirement:\n");
    prompt.push_str("Return a JSON object wrapped in ```json code blocks.\n");
    prompt.push_str(respond_line(language));
    prompt.push_str("\n\nStructure:\n");
    prompt.push_str(TRADE_EVALUATION_SCHEMA);
    prompt
}

/// Builds the B2B buyer scouting prompt.
pub fn buyer_search_prompt(inquiry: &BuyerInquiry, language: Language) -> String {
    let mut prompt = String::from("Act as a B2B Sales Director.\n\n");

    prompt.push_str(&format!("Target Country: {}\n", inquiry.country));
    prompt.push_str(&format!("Target Channel: {}\n", inquiry.channel));
    prompt.push_str(&format!("Product Category: \"{}\"\n", inquiry.niche));
    prompt.push_str(&format!("Buyer Company Size: {}\n", inquiry.size));
    if let Some(channels) = inquiry.distribution_channels.as_deref() {
        prompt.push_str(&format!("Existing Distribution Channels: {}\n", channels));
    }
    prompt.push('\n');

    prompt.push_str(&format!(
        "Task:\n\
         Find 5-10 specific potential buyers, retailers, or distributor companies in {country} that operate in the {channel} sector and would likely stock {niche}.\n\n\
         Instructions:\n\
         1. Use Google Search to find REAL existing companies.\n\
         2. Focus on major chains or prominent players in that specific channel.\n\
         3. For example, if channel is 'Supermarket' in 'UK', look for Tesco, Sainsbury's, etc. if relevant to the product.\n\
         4. If channel is 'Vending Machine', look for vending machine operators or distributors.\n\n",
        country = inquiry.country,
        channel = inquiry.channel,
        niche = inquiry.niche
    ));

    prompt.push_str("Output Requirement:\n");
    prompt.push_str("Return a JSON object wrapped in ```json code blocks.\n");
    prompt.push_str(respond_line(language));
    prompt.push_str("\n\nStructure:\n");
    prompt.push_str(BUYER_LIST_SCHEMA);
    prompt
}

/// Builds the creator discovery prompt.
pub fn creator_discovery_prompt(filters: &CreatorFilters, language: Language) -> String {
    let mut prompt = String::from("Act as a Social Media Scout.\n\n");

    prompt.push_str(&format!(
        "Find 5-10 TikTok creators/influencers in the \"{}\" niche/category.\n\n",
        filters.topic
    ));
    prompt.push_str(&format!(
        "They must match these criteria:\n\
         - Average Video Views: {}\n\
         - Follower Count: {}\n\n",
        filters.views, filters.followers
    ));
    prompt.push_str("Use Google Search to verify they exist and fit the description.\n\n");

    prompt.push_str("Output Requirement:\n");
    prompt.push_str("Return a JSON object wrapped in ```json code blocks.\n");
    prompt.push_str(creator_language_line(language));
    prompt.push_str("\n\nStructure:\n");
    prompt.push_str(CREATOR_LIST_SCHEMA);
    prompt
}

/// Builds the shop link search prompt.
///
/// This flow reads the provider's grounding links instead of the reply
/// text, so the prompt asks for URLs and carries no JSON schema or
/// language directive.
pub fn shop_search_prompt(term: &str) -> String {
    let handle_guess: String = term.split_whitespace().collect();
    let mut prompt = String::from("Act as a Social Media Researcher.\n\n");

    prompt.push_str(&format!(
        "Target: Find TikTok content for the brand or shop \"{}\".\n\n",
        term
    ));
    prompt.push_str(&format!(
        "Instructions:\n\
         1. Perform a Google Search using the STRICT query: site:tiktok.com {term}\n\
         2. This is required to filter out official websites and only see TikTok pages.\n\
         3. Look for the official account (e.g. @{handle}) and popular videos.\n\n",
        term = term,
        handle = handle_guess
    ));
    prompt.push_str("Return the list of TikTok URLs found.");
    prompt
}

fn market_language_line(language: Language) -> &'static str {
    match language {
        Language::En => "The content MUST be in English.",
        Language::Zh => "IMPORTANT: The content of the JSON values MUST be in Simplified Chinese.",
    }
}

fn logistics_language_line(language: Language) -> &'static str {
    match language {
        Language::En => "Respond in English.",
        Language::Zh => "Respond in Simplified Chinese. (Currency can remain in USD).",
    }
}

fn creator_language_line(language: Language) -> &'static str {
    match language {
        Language::En => "Respond in English.",
        Language::Zh => "Respond in Simplified Chinese (except for handle).",
    }
}

fn respond_line(language: Language) -> &'static str {
    match language {
        Language::En => "Respond in English.",
        Language::Zh => "Respond in Simplified Chinese.",
    }
}

const MARKET_ANALYSIS_SCHEMA: &str = r#"{
  "marketSummary": "Executive summary of the market opportunity (approx 100 words).",
  "fiveYearTrendAnalysis": "Analysis of search/market trends from 2020-2025.",
  "swot": {
    "strengths": ["..."],
    "weaknesses": ["..."],
    "opportunities": ["..."],
    "threats": ["..."]
  },
  "competitors": [
    { "name": "Brand - Product Name", "features": "Key features", "price": "Current Price (e.g. $29.99)", "website": "URL" }
  ],
  "chartData": {
    "trends": [
      { "year": "2020", "marketSize": 45 },
      { "year": "2021", "marketSize": 50 },
      { "year": "2022", "marketSize": 55 },
      { "year": "2023", "marketSize": 60 },
      { "year": "2024", "marketSize": 75 },
      { "year": "2025", "marketSize": 85 }
    ],
    "shares": [
      { "name": "Competitor A", "share": 30 },
      { "name": "Competitor B", "share": 25 },
      { "name": "Your Brand (Projected)", "share": 5 },
      { "name": "Others", "share": 40 }
    ]
  },
  "consumerSentiment": "Summary of what customers value (e.g. durability, aesthetic) and pain points.",
  "marketingChannels": ["Channel 1 - Why?", "Channel 2 - Strategy"],
  "pricingStrategy": "Specific advice on pricing relative to the found competitors.",
  "actionPlan": ["Month 1: ...", "Month 2-3: ...", "Month 4-6: ..."]
}"#;

const LOGISTICS_SCHEMA: &str = r#"{
  "seaFreightCost": { "perCbm": "$X - $Y USD", "perUnit": "$A - $B USD" },
  "airFreightCost": { "perKg": "$X - $Y USD", "perUnit": "$A - $B USD" },
  "advice": "Your logistics strategy advice here...",
  "warehouses": ["Warehouse Name 1", "Warehouse Name 2"]
}"#;

const TRADE_EVALUATION_SCHEMA: &str = r#"{
  "matchScore": number (1-10),
  "demandScore": number (1-10),
  "developmentScore": number (1-10),
  "reasoning": "A brief explanation (max 50 words) of why these scores were given."
}"#;

const BUYER_LIST_SCHEMA: &str = r#"[
  {
    "name": "Company Name",
    "type": "e.g. Supermarket Chain / Distributor",
    "description": "Brief description of who they are and why they are a match.",
    "website": "Website URL if found"
  }
]"#;

const CREATOR_LIST_SCHEMA: &str = r#"[
  { "handle": "@username", "name": "Creator Name", "followers": "e.g. 12.5K", "avgViews": "e.g. 20K", "description": "Short description of their content" }
]"#;
