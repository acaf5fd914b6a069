mod parser;
mod recording;
