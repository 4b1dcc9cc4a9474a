mod matcher;
mod pipeline;
