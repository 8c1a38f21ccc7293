// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddStockRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(double, tag = "3")]
    pub quantity: f64,
    #[prost(double, tag = "4")]
    pub purchase_price: f64,
    #[prost(int64, tag = "5")]
    pub purchase_date: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddStockResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub stock: ::core::option::Option<Stock>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetPortfolioRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPortfolioResponse {
    #[prost(message, repeated, tag = "1")]
    pub stocks: ::prost::alloc::vec::Vec<Stock>,
    #[prost(double, tag = "2")]
    pub total_value: f64,
    #[prost(double, tag = "3")]
    pub total_gain_loss: f64,
    #[prost(double, tag = "4")]
    pub total_gain_loss_percentage: f64,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct RemoveStockRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub stock_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct RemoveStockResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetPriceAlertRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(double, tag = "3")]
    pub target_price: f64,
    #[prost(enumeration = "AlertCondition", tag = "4")]
    pub condition: i32,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SetPriceAlertResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub alert_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetAlertsRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAlertsResponse {
    #[prost(message, repeated, tag = "1")]
    pub alerts: ::prost::alloc::vec::Vec<Alert>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetPriceRequest {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct StreamPricesRequest {
    #[prost(string, repeated, tag = "1")]
    pub symbols: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "2")]
    pub user_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PriceUpdate {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(double, tag = "2")]
    pub current_price: f64,
    #[prost(double, tag = "3")]
    pub change: f64,
    #[prost(double, tag = "4")]
    pub change_percentage: f64,
    #[prost(int64, tag = "5")]
    pub timestamp: i64,
    #[prost(double, tag = "6")]
    pub volume: f64,
    #[prost(double, tag = "7")]
    pub day_high: f64,
    #[prost(double, tag = "8")]
    pub day_low: f64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PortfolioAction {
    #[prost(enumeration = "portfolio_action::ActionType", tag = "1")]
    pub action: i32,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub add_details: ::core::option::Option<AddStockRequest>,
}
/// Nested message and enum types in `PortfolioAction`.
pub mod portfolio_action {
    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        ::prost::Enumeration
    )]
    #[repr(i32)]
    pub enum ActionType {
        Subscribe = 0,
        Unsubscribe = 1,
        AddStock = 2,
        RemoveStock = 3,
    }
    impl ActionType {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Subscribe => "SUBSCRIBE",
                Self::Unsubscribe => "UNSUBSCRIBE",
                Self::AddStock => "ADD_STOCK",
                Self::RemoveStock => "REMOVE_STOCK",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "SUBSCRIBE" => Some(Self::Subscribe),
                "UNSUBSCRIBE" => Some(Self::Unsubscribe),
                "ADD_STOCK" => Some(Self::AddStock),
                "REMOVE_STOCK" => Some(Self::RemoveStock),
                _ => None,
            }
        }
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PortfolioUpdate {
    #[prost(enumeration = "portfolio_update::UpdateType", tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub price_update: ::core::option::Option<PriceUpdate>,
    #[prost(message, optional, tag = "3")]
    pub alert: ::core::option::Option<Alert>,
    #[prost(message, optional, tag = "4")]
    pub portfolio_summary: ::core::option::Option<GetPortfolioResponse>,
    #[prost(int64, tag = "5")]
    pub timestamp: i64,
}
/// Nested message and enum types in `PortfolioUpdate`.
pub mod portfolio_update {
    #[derive(
        Clone,
        Copy,
        Debug,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        ::prost::Enumeration
    )]
    #[repr(i32)]
    pub enum UpdateType {
        PriceChange = 0,
        AlertTriggered = 1,
        PortfolioSummary = 2,
    }
    impl UpdateType {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::PriceChange => "PRICE_CHANGE",
                Self::AlertTriggered => "ALERT_TRIGGERED",
                Self::PortfolioSummary => "PORTFOLIO_SUMMARY",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "PRICE_CHANGE" => Some(Self::PriceChange),
                "ALERT_TRIGGERED" => Some(Self::AlertTriggered),
                "PORTFOLIO_SUMMARY" => Some(Self::PortfolioSummary),
                _ => None,
            }
        }
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Stock {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(double, tag = "4")]
    pub quantity: f64,
    #[prost(double, tag = "5")]
    pub purchase_price: f64,
    #[prost(double, tag = "6")]
    pub current_price: f64,
    #[prost(double, tag = "7")]
    pub gain_loss: f64,
    #[prost(double, tag = "8")]
    pub gain_loss_percentage: f64,
    #[prost(int64, tag = "9")]
    pub purchase_date: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Alert {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(double, tag = "3")]
    pub target_price: f64,
    #[prost(double, tag = "4")]
    pub triggered_price: f64,
    #[prost(enumeration = "AlertCondition", tag = "5")]
    pub condition: i32,
    #[prost(int64, tag = "6")]
    pub created_at: i64,
    #[prost(int64, tag = "7")]
    pub triggered_at: i64,
    #[prost(bool, tag = "8")]
    pub is_triggered: bool,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AlertCondition {
    Above = 0,
    Below = 1,
}
impl AlertCondition {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Above => "ABOVE",
            Self::Below => "BELOW",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "ABOVE" => Some(Self::Above),
            "BELOW" => Some(Self::Below),
            _ => None,
        }
    }
}
