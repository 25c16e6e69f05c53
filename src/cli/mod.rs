use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat HTTP API (`POST /chat`, `GET /chat`)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Development mode: include internal error details in 500 responses
        #[arg(long)]
        dev: bool,
    },

    /// Send one message and print the reply (and any generated image URLs)
    Chat {
        message: String,

        /// Persona: supportive_friend, nutritionist or fitness_trainer
        #[arg(short, long)]
        role: Option<String>,

        /// Stream the reply as it is generated (no images)
        #[arg(long)]
        stream: bool,

        #[arg(short, long)]
        temperature: Option<f32>,

        #[arg(long)]
        max_tokens: Option<u32>,

        /// Ask the model for deep reasoning
        #[arg(long)]
        deep_reasoning: bool,
    },

    /// Show upstream configuration status
    Health,
}
