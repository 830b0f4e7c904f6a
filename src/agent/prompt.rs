//! Prompt template for the planner.

/// Build the planning prompt for `user_task` given the registered tool names.
pub fn build_planner_prompt(user_task: &str, tools: &[String]) -> String {
    let tool_list = tools
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a Planner Agent.

Task: "{user_task}"

Available tools: [{tool_list}]

You must create MULTIPLE steps if the user asks for multiple things.

Output ONLY valid JSON in this format:

{{
  "steps": [
    {{"action": "tool_name", "input": {{"key": "value"}}}}
  ]
}}"#,
        user_task = user_task,
        tool_list = tool_list
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_task_and_tools() {
        let tools = vec!["weather_tool".to_string(), "news_tool".to_string()];
        let prompt = build_planner_prompt("weather in Pune", &tools);
        assert!(prompt.contains(r#"Task: "weather in Pune""#));
        assert!(prompt.contains(r#"Available tools: ["weather_tool", "news_tool"]"#));
        assert!(prompt.contains("MULTIPLE steps"));
        assert!(prompt.contains(r#""steps": ["#));
    }
}
