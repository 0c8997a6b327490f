//! Substitute payloads returned in place of failed backend calls.
//!
//! Every generator has the endpoint's real record type, so a consumer
//! cannot tell the shape apart from live data. Generators receive the JSON
//! request body (`Value::Null` for bodiless calls); only chat reads it.
//! Nothing here is cached: each call builds a fresh value.

use serde_json::Value;

use crate::api::models::{
    AlertItem, AlertSeverity, AnalyticsData, CategoryValue, ChatResponse, Customer, CustomerData,
    CustomerStats, FileItem, FileSize, ForecastData, ForecastPoint, Money, Report, TrendPoint,
};

pub fn analytics(_request: &Value) -> AnalyticsData {
    let trend = [
        ("2024-01-01", 8_500.0),
        ("2024-01-15", 12_000.0),
        ("2024-02-01", 15_000.0),
        ("2024-02-15", 18_500.0),
        ("2024-03-01", 22_000.0),
        ("2024-03-15", 25_000.0),
    ];
    let categories = [
        ("Electronics", 35_000.0),
        ("Clothing", 28_000.0),
        ("Home & Garden", 32_000.0),
        ("Sports", 20_000.0),
        ("Books", 10_000.0),
    ];

    AnalyticsData {
        total_sales: Some(125_000.0),
        conversion_rate: Some(3.5),
        avg_order_value: Some(285.50),
        customer_retention: Some(82.0),
        sales_trend: trend
            .iter()
            .map(|(date, value)| TrendPoint {
                date: (*date).to_string(),
                value: *value,
            })
            .collect(),
        category_breakdown: categories
            .iter()
            .map(|(name, value)| CategoryValue {
                name: (*name).to_string(),
                value: *value,
            })
            .collect(),
    }
}

pub fn forecast(_request: &Value) -> ForecastData {
    let points = [
        ("2024-02-01", 45_000.0, Some(42_000.0)),
        ("2024-03-01", 48_000.0, Some(46_500.0)),
        ("2024-04-01", 52_000.0, None),
        ("2024-05-01", 55_000.0, None),
        ("2024-06-01", 58_000.0, None),
        ("2024-07-01", 56_000.0, None),
    ];

    ForecastData {
        revenue_prediction: Some(52_400.0),
        confidence_score: Some(0.89),
        peak_period: Some("Q2 2024".to_string()),
        forecast_data: points
            .iter()
            .map(|(date, predicted, actual)| ForecastPoint {
                date: (*date).to_string(),
                predicted: *predicted,
                actual: *actual,
            })
            .collect(),
    }
}

pub fn files(_request: &Value) -> Vec<FileItem> {
    [
        ("1", "Q4_2023_Sales_Report.csv", "CSV", "2.4 MB", "2024-01-05"),
        ("2", "Customer_Data_Export.xlsx", "Excel", "1.8 MB", "2024-01-04"),
        ("3", "Inventory_Update.csv", "CSV", "856 KB", "2024-01-03"),
        ("4", "Marketing_Campaign_Results.pdf", "PDF", "3.2 MB", "2024-01-02"),
        ("5", "Financial_Statements_2023.xlsx", "Excel", "945 KB", "2024-01-01"),
    ]
    .iter()
    .map(|(id, name, kind, size, uploaded_at)| FileItem {
        id: (*id).to_string(),
        name: (*name).to_string(),
        kind: (*kind).to_string(),
        size: FileSize::Label((*size).to_string()),
        uploaded_at: (*uploaded_at).to_string(),
    })
    .collect()
}

pub fn reports(_request: &Value) -> Vec<Report> {
    [
        ("1", "Monthly Sales Report", "Sales", "2024-01-31", "Completed"),
        ("2", "Customer Analytics Report", "Analytics", "2024-01-30", "Completed"),
        ("3", "Revenue Forecast Report", "Forecast", "2024-01-28", "Completed"),
        ("4", "Quarterly Business Review", "Business", "2024-01-25", "In Progress"),
        ("5", "Market Research Summary", "Market Research", "2024-01-20", "Completed"),
    ]
    .iter()
    .map(|(id, title, kind, date, status)| Report {
        id: (*id).to_string(),
        title: (*title).to_string(),
        kind: (*kind).to_string(),
        date: (*date).to_string(),
        status: (*status).to_string(),
    })
    .collect()
}

pub fn customers(_request: &Value) -> CustomerData {
    let rows = [
        ("1", "TechCorp Industries", "contact@techcorp.com", "Active", "$45,200", "2024-01-15"),
        ("2", "Global Solutions Ltd", "sales@globalsolutions.com", "At Risk", "$32,100", "2023-11-20"),
        ("3", "Enterprise Systems Co", "procurement@enterprise.com", "Active", "$28,500", "2024-01-10"),
        ("4", "Digital Marketing Group", "info@digimarket.com", "Active", "$19,800", "2024-01-18"),
        ("5", "Innovation Labs Inc", "sales@innovlabs.com", "Inactive", "$15,300", "2023-09-05"),
    ];

    CustomerData {
        customers: rows
            .iter()
            .map(|(id, name, email, status, spent, last_order)| Customer {
                id: (*id).to_string(),
                name: (*name).to_string(),
                email: (*email).to_string(),
                phone: None,
                status: (*status).to_string(),
                total_spent: Some(Money::Label((*spent).to_string())),
                last_order: Some((*last_order).to_string()),
            })
            .collect(),
        stats: Some(CustomerStats {
            total: Some(1_247),
            active: Some(1_089),
            new_this_month: None,
            avg_order_value: Some(285.50),
        }),
    }
}

pub fn alerts(_request: &Value) -> Vec<AlertItem> {
    [
        ("1", AlertSeverity::Success, "High Sales Growth Detected", "Sales increased by 37.6% this month", "2024-01-31"),
        ("2", AlertSeverity::Warning, "Customer At Risk", "Global Solutions Ltd hasn't purchased in 70 days", "2024-01-30"),
        ("3", AlertSeverity::Success, "Revenue Target Met", "Monthly revenue target of $125,000 achieved", "2024-01-29"),
        ("4", AlertSeverity::Error, "Low Inventory Alert", "3 products below minimum inventory threshold", "2024-01-28"),
        ("5", AlertSeverity::Info, "New Top Customer", "TechCorp Industries is now your #1 customer", "2024-01-27"),
    ]
    .iter()
    .map(|(id, severity, title, message, timestamp)| AlertItem {
        id: (*id).to_string(),
        severity: *severity,
        title: (*title).to_string(),
        message: (*message).to_string(),
        timestamp: (*timestamp).to_string(),
        read: false,
    })
    .collect()
}

/// Canned chat reply chosen from the `message` field of the request body.
pub fn chat(request: &Value) -> ChatResponse {
    let message = request
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let reply = select_topic(message).reply().to_string();

    ChatResponse {
        response: Some(reply.clone()),
        message: Some(reply),
    }
}

// ---------------------------------------------------------------------------
// Chat keyword matching
// ---------------------------------------------------------------------------

/// Subject of a canned chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTopic {
    TopProducts,
    SalesTrend,
    QuarterlyRevenue,
    AtRiskCustomers,
    Forecast,
    FileListing,
    Help,
    General,
}

enum Keywords {
    All(&'static [&'static str]),
    Any(&'static [&'static str]),
}

impl Keywords {
    fn matches(&self, text: &str) -> bool {
        match self {
            Keywords::All(words) => words.iter().all(|w| text.contains(w)),
            Keywords::Any(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

// Checked in order; first match wins.
const RULES: &[(Keywords, ChatTopic)] = &[
    (Keywords::All(&["top", "product"]), ChatTopic::TopProducts),
    (Keywords::All(&["sales", "trend"]), ChatTopic::SalesTrend),
    (Keywords::All(&["revenue", "quarter"]), ChatTopic::QuarterlyRevenue),
    (Keywords::All(&["customer", "attention"]), ChatTopic::AtRiskCustomers),
    (Keywords::Any(&["forecast", "predict"]), ChatTopic::Forecast),
    (Keywords::Any(&["data", "file"]), ChatTopic::FileListing),
    (Keywords::Any(&["help"]), ChatTopic::Help),
];

/// Case-insensitive substring match against the rule table.
pub fn select_topic(message: &str) -> ChatTopic {
    let text = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.matches(&text))
        .map_or(ChatTopic::General, |(_, topic)| *topic)
}

impl ChatTopic {
    pub fn reply(&self) -> &'static str {
        match self {
            ChatTopic::TopProducts => "Based on your sales data, your top-performing products are:\n\n\
                1. **Premium Analytics Suite** - $45,200 in sales\n\
                2. **Enterprise Dashboard License** - $38,500 in sales\n\
                3. **Advanced Reporting Tools** - $32,100 in sales\n\n\
                These three products account for 62% of your total revenue this quarter.",
            ChatTopic::SalesTrend => "Your sales trends for the last month show:\n\n\
                • Week 1: $28,500 (baseline)\n\
                • Week 2: $31,200 (+9.5%)\n\
                • Week 3: $35,800 (+14.7%)\n\
                • Week 4: $39,200 (+9.5%)\n\n\
                Overall growth: +37.6% month-over-month. This positive trend is driven by \
                increased marketing efforts and seasonal demand.",
            ChatTopic::QuarterlyRevenue => "Based on current trends and historical data, I predict your \
                Q2 2024 revenue will be approximately **$187,500**.\n\n\
                Confidence Score: 87%\n\
                Factors considered:\n\
                - Historical growth rate (+8.5% QoQ)\n\
                - Current sales momentum\n\
                - Seasonal trends\n\
                - Market conditions\n\n\
                This represents a 12.4% increase from Q1 2024.",
            ChatTopic::AtRiskCustomers => "Top customers requiring attention:\n\n\
                1. **TechCorp Industries** - Last purchase 45 days ago (usually buys every 30 days). Risk: MEDIUM\n\
                2. **Global Solutions Ltd** - 3 failed renewal attempts. Risk: HIGH\n\
                3. **Enterprise Systems Co** - High support tickets but low engagement. Risk: MEDIUM\n\n\
                I recommend reaching out to the high-risk accounts this week with special offers or check-ins.",
            ChatTopic::Forecast => "Here are my business forecasts based on current data:\n\n\
                **Revenue Forecast (Next 6 months)**\n\
                - Jan 2024: $45,000\n\
                - Feb 2024: $48,500\n\
                - Mar 2024: $52,100\n\
                - Apr 2024: $55,800\n\
                - May 2024: $58,200\n\
                - Jun 2024: $61,500\n\n\
                Average Growth: 6.2% month-over-month",
            ChatTopic::FileListing => "You have 5 data files uploaded:\n\n\
                1. sales_data_2024.csv (2.4 MB) - Last updated today\n\
                2. customer_analytics.xlsx (1.8 MB) - Updated 3 days ago\n\
                3. Inventory_Update.csv (856 KB) - Updated yesterday\n\
                4. Marketing_Campaign_Results.pdf (3.2 MB) - Updated 2 days ago\n\
                5. Financial_Statements_2023.xlsx (945 KB) - Updated 7 days ago\n\n\
                Would you like me to analyze any of these files?",
            ChatTopic::Help => "I can help you with:\n\n\
                **Analytics & Reports**\n\
                - Sales trends and performance metrics\n\
                - Customer insights and segmentation\n\
                - Product performance analysis\n\n\
                **Forecasting**\n\
                - Revenue predictions\n\
                - Trend analysis\n\
                - Seasonal adjustments\n\n\
                **Data Management**\n\
                - File analysis\n\
                - Data interpretation\n\
                - Report generation\n\n\
                Just ask me anything about your business data!",
            ChatTopic::General => "Thank you for your question. Based on your business data:\n\n\
                Your current performance metrics show strong growth with 37.6% month-over-month \
                sales increase. Customer retention is at 82%, and your average order value is $285.50.\n\n\
                Would you like me to dive deeper into any specific area? I can help with sales \
                analysis, forecasting, customer insights, or file management.",
        }
    }
}
