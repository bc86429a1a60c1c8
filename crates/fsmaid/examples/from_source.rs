//! Example: Rendering every state machine of a C source snippet
//!
//! Locates the declarations, prints the warnings raised for each machine
//! and the Mermaid chart it renders to.

use fsmaid::{ChartBuilder, config::AppConfig};

const SOURCE: &str = r#"
FSM_STATES_INIT(traffic)
FSM_CREATE_STATE(traffic, RUNNING_ST,  FSM_ST_NONE,  RED_ST,       NULL,       NULL,     NULL)
FSM_CREATE_STATE(traffic, RED_ST,      RUNNING_ST,   FSM_ST_NONE,  enter_red,  NULL,     NULL)
FSM_CREATE_STATE(traffic, GREEN_ST,    RUNNING_ST,   FSM_ST_NONE,  enter_grn,  NULL,     NULL)
FSM_CREATE_STATE(traffic, YELLOW_ST,   RUNNING_ST,   FSM_ST_NONE,  enter_ylw,  NULL,     NULL)
FSM_CREATE_STATE(traffic, FAULT_ST,    FSM_ST_NONE,  FSM_ST_NONE,  blink,      NULL,     NULL)
FSM_STATES_END()

FSM_TRANSITIONS_INIT(traffic)
FSM_TRANSITION_CREATE(traffic, RED_ST,     TIMER_EV,  GREEN_ST)
FSM_TRANSITION_CREATE(traffic, GREEN_ST,   TIMER_EV,  YELLOW_ST)
FSM_TRANSITION_CREATE(traffic, YELLOW_ST,  TIMER_EV,  RED_ST)
FSM_TRANSITION_CREATE(traffic, RUNNING_ST, FAULT_EV,  FAULT_ST)
FSM_TRANSITIONS_END()
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let builder = ChartBuilder::new(AppConfig::default());
    let declarations = builder.locate(SOURCE);

    println!("Found {} state machine(s)\n", declarations.len());

    for declaration in &declarations {
        let chart = builder.build(SOURCE, declaration);
        for diagnostic in chart.diagnostics() {
            eprintln!("{diagnostic}");
        }

        println!("{}.md:", chart.name());
        println!("{}", builder.render(&chart)?);
    }

    Ok(())
}
