//! The smallest possible tool: a fixed answer to "Where am I?"

use crate::{Result, Tool, schema};
use async_trait::async_trait;
use serde_json::{Value, json};

pub const WHERE_AM_I: &str = "respond_where_am_i";

/// Where the workshop is held
pub const VENUE: &str = "DevFest Armenia";

/// Answers "Where am I?" with the venue, ignoring its parameters
pub struct WhereAmITool;

#[async_trait]
impl Tool for WhereAmITool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        Ok(json!({ "success": true, "message": VENUE }))
    }

    fn name(&self) -> &'static str {
        WHERE_AM_I
    }

    fn description(&self) -> &'static str {
        "Responds to a question \"Where am I?\" with \"DevFest Armenia\""
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({}), &[])
    }
}
