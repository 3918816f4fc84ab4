/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use dsi_progress_logger::prelude::*;
use std::path::Path;
use std::str::FromStr;
use webgraph::prelude::BvGraph;
use webgraph_dobfs::prelude::*;

/// Parses the positional argument in position `pos`, if present.
fn arg<T: FromStr>(pos: usize, name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::args()
        .nth(pos)
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("Invalid {}: {}", name, value))
        })
        .transpose()
}

/// Loads a graph, and its transpose if `<basename>-t.graph` exists.
fn load(basename: &str, pl: &mut impl ProgressLog) -> Result<(Csr, Option<Csr>)> {
    pl.info(format_args!("Loading graph {}...", basename));
    let graph = Csr::from_graph(
        &BvGraph::with_basename(basename)
            .load()
            .with_context(|| format!("Cannot load graph {}", basename))?,
    );

    let transposed_basename = basename.to_owned() + "-t";
    let transposed = if Path::new(&(transposed_basename.clone() + ".graph")).exists() {
        pl.info(format_args!("Loading transpose {}...", transposed_basename));
        Some(Csr::from_graph(
            &BvGraph::with_basename(&transposed_basename)
                .load()
                .with_context(|| format!("Cannot load graph {}", transposed_basename))?,
        ))
    } else {
        None
    };

    Ok((graph, transposed))
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let operation: String = arg(1, "operation")?.context("No operation provided")?;
    let basename: String = arg(2, "basename")?.context("No graph basename provided")?;
    let mut main_pl = progress_logger![display_memory = true];

    let (graph, transposed) = load(&basename, &mut main_pl)?;
    if transposed.is_none() && !graph.is_symmetric() {
        main_pl.info(format_args!(
            "WARNING: the graph is not symmetric and {}-t.graph does not exist; levels computed by bottom-up rounds may be wrong",
            basename
        ));
    }
    let mut dispatch = ParDispatch::with_num_threads(arg(6, "number of threads")?.unwrap_or(0))?;
    main_pl.info(format_args!("Using {} threads", dispatch.num_threads()));

    let distances = match operation.as_str() {
        "levels" => {
            let config = Config {
                alpha: arg(3, "alpha")?.context("No alpha provided")?,
                beta: arg(4, "beta")?.context("No beta provided")?,
                root: arg(5, "root")?.unwrap_or(0),
            };
            main_pl.info(format_args!("Constants {} {}", config.alpha, config.beta));
            DirectionOptimizing::new(&graph)
                .with_policy(config.policy())
                .with_transposed(transposed.as_ref())?
                .visit(config.root, &mut dispatch, &mut main_pl)?
        }
        "density" => {
            let policy = FrontierDensity::new(
                arg(3, "alpha")?.unwrap_or(FrontierDensity::DEFAULT_ALPHA),
                arg(4, "beta")?.unwrap_or(FrontierDensity::DEFAULT_BETA),
            );
            DirectionOptimizing::new(&graph)
                .with_policy(policy)
                .with_transposed(transposed.as_ref())?
                .visit(arg(5, "root")?.unwrap_or(0), &mut dispatch, &mut main_pl)?
        }
        _ => anyhow::bail!(
            "Unknown operation {} (usage: webgraph-dobfs levels|density BASENAME [ALPHA] [BETA] [ROOT] [THREADS])",
            operation
        ),
    };

    main_pl.info(format_args!(
        "Reached {} of {} nodes in {} rounds (eccentricity: {}, directions: {:?})",
        distances.num_reached(),
        distances.num_nodes(),
        distances.rounds(),
        distances.eccentricity(),
        distances.directions()
    ));

    Ok(())
}
