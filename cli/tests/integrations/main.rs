mod run;
mod serve;
