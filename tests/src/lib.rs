#[cfg(test)]
mod utils;

#[cfg(test)]
mod nat_flow;

#[cfg(test)]
mod probe_flow;
