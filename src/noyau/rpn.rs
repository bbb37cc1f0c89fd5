// src/noyau/rpn.rs
//
// Shunting-yard à deux piles (valeurs / opérateurs), repli immédiat.
//
// Règles:
// - valeur = (grandeur exacte, porte une unité ?) ; la grandeur est en mètres
//   dès qu’une unité a été résolue, l’unité précise est oubliée
// - + et - : les deux côtés portent une unité, ou aucun
// - * et / : au plus un côté porte une unité (pas d’aire / volume)
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur -> négation
//   (garde le drapeau d’unité) ; '+' unaire est ignoré
// - Pas de multiplication implicite : deux valeurs adjacentes -> "Missing operator"

use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::Demarche;
use super::format::format_rat_pretty;
use super::jetons::Tok;
use super::lecture::parse_nombre;
use super::unites::{Unite, UniteSortie};

/// Valeur étiquetée : grandeur + drapeau d’unité.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valeur {
    pub grandeur: BigRational,
    pub avec_unite: bool,
}

impl Valeur {
    pub fn nombre(grandeur: BigRational) -> Self {
        Self {
            grandeur,
            avec_unite: false,
        }
    }

    pub fn longueur(metres: BigRational) -> Self {
        Self {
            grandeur: metres,
            avec_unite: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Neg,
    LPar,
}

fn precedence(op: Op) -> i32 {
    match op {
        Op::Plus | Op::Minus => 1,
        Op::Star | Op::Slash => 2,
        Op::Neg => 3,
        Op::LPar => 0,
    }
}

fn symbole(op: Op) -> &'static str {
    match op {
        Op::Plus => "+",
        Op::Minus | Op::Neg => "-",
        Op::Star => "*",
        Op::Slash => "/",
        Op::LPar => "(",
    }
}

fn operande_manquant() -> ErreurCalcul {
    ErreurCalcul::syntaxe("Missing operand")
}

fn operateur_manquant() -> ErreurCalcul {
    ErreurCalcul::syntaxe("Missing operator")
}

/// Littéral (+ suffixe) -> valeur ; l’unité est convertie en mètres ici.
fn valeur_litterale(
    texte: &str,
    unite: Option<&str>,
    demarche: &mut Demarche,
) -> Resultat<Valeur> {
    let nombre = parse_nombre(texte, demarche)?;
    let Some(suffixe) = unite else {
        return Ok(Valeur::nombre(nombre));
    };

    let u = Unite::depuis_suffixe(suffixe)?;
    let metres = &nombre * u.facteur();
    demarche.note(format!(
        "Converted {} {} -> {} Meters",
        format_rat_pretty(&nombre),
        u.libelle(),
        format_rat_pretty(&metres)
    ));
    Ok(Valeur::longueur(metres))
}

fn applique_binaire(
    op: Op,
    gauche: Valeur,
    droite: Valeur,
    demarche: &mut Demarche,
) -> Resultat<Valeur> {
    demarche.note(format!(
        "Operation: {} ({}) {} {} ({})",
        format_rat_pretty(&gauche.grandeur),
        gauche.avec_unite,
        symbole(op),
        format_rat_pretty(&droite.grandeur),
        droite.avec_unite
    ));

    match op {
        Op::Star | Op::Slash => {
            if gauche.avec_unite && droite.avec_unite {
                return Err(ErreurCalcul::valeur("Cannot multiply/divide units"));
            }
            let grandeur = if op == Op::Star {
                gauche.grandeur * droite.grandeur
            } else {
                if droite.grandeur.is_zero() {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                gauche.grandeur / droite.grandeur
            };
            Ok(Valeur {
                grandeur,
                avec_unite: gauche.avec_unite || droite.avec_unite,
            })
        }
        Op::Plus | Op::Minus => {
            if gauche.avec_unite != droite.avec_unite {
                return Err(ErreurCalcul::valeur("Unit mismatch"));
            }
            let grandeur = if op == Op::Plus {
                gauche.grandeur + droite.grandeur
            } else {
                gauche.grandeur - droite.grandeur
            };
            Ok(Valeur {
                grandeur,
                avec_unite: gauche.avec_unite,
            })
        }
        Op::Neg | Op::LPar => Err(ErreurCalcul::interne(format!(
            "opérateur binaire attendu, trouvé '{}'",
            symbole(op)
        ))),
    }
}

/// Dépile l’opérateur `op` sur la pile de valeurs.
fn applique(op: Op, valeurs: &mut Vec<Valeur>, demarche: &mut Demarche) -> Resultat<()> {
    if op == Op::Neg {
        let v = valeurs.pop().ok_or_else(operande_manquant)?;
        valeurs.push(Valeur {
            grandeur: -v.grandeur,
            avec_unite: v.avec_unite,
        });
        return Ok(());
    }

    let droite = valeurs.pop().ok_or_else(operande_manquant)?;
    let gauche = valeurs.pop().ok_or_else(operande_manquant)?;
    valeurs.push(applique_binaire(op, gauche, droite, demarche)?);
    Ok(())
}

/// Replie les jetons en UNE valeur étiquetée.
pub fn evalue(jetons: &[Tok], demarche: &mut Demarche) -> Resultat<Valeur> {
    let mut valeurs: Vec<Valeur> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();

    // “valeur” = un littéral ou une expression fermée.
    // Sert à détecter le moins unaire et les opérateurs/opérandes manquants.
    let mut prev_was_value = false;

    for tok in jetons {
        match tok {
            Tok::Num { texte, unite } => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                valeurs.push(valeur_litterale(texte, unite.as_deref(), demarche)?);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(operateur_manquant());
                }
                ops.push(Op::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(operande_manquant());
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Op::LPar) => break,
                        Some(op) => applique(op, &mut valeurs, demarche)?,
                        None => return Err(ErreurCalcul::syntaxe("Unmatched ')'")),
                    }
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let op = match tok {
                    Tok::Plus => Op::Plus,
                    Tok::Minus => Op::Minus,
                    Tok::Star => Op::Star,
                    _ => Op::Slash,
                };

                if !prev_was_value {
                    match op {
                        Op::Minus => ops.push(Op::Neg),
                        Op::Plus => {}
                        _ => return Err(operande_manquant()),
                    }
                    continue;
                }

                // gauche-associatif : on sort tout ce qui lie au moins aussi fort
                while let Some(&top) = ops.last() {
                    if top == Op::LPar || precedence(top) < precedence(op) {
                        break;
                    }
                    ops.pop();
                    applique(top, &mut valeurs, demarche)?;
                }

                ops.push(op);
                prev_was_value = false;
            }
        }
    }

    if !jetons.is_empty() && !prev_was_value {
        return Err(operande_manquant());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Op::LPar {
            return Err(ErreurCalcul::syntaxe("Missing ')'"));
        }
        applique(op, &mut valeurs, demarche)?;
    }

    let resultat = valeurs.pop().ok_or_else(operande_manquant)?;
    if !valeurs.is_empty() {
        return Err(operateur_manquant());
    }

    demarche.note(format!(
        "Final Raw Value: {} (Meters), Is Unit: {}",
        format_rat_pretty(&resultat.grandeur),
        resultat.avec_unite
    ));
    Ok(resultat)
}

/// Conversion finale (une seule fois) : mètres -> unité demandée.
/// Feet-In -> pouces (découpés en pieds + pouces seulement à l’affichage).
/// Sans unité : la grandeur est rendue telle quelle, l’unité demandée est ignorée.
pub fn convertit_sortie(v: Valeur, sortie: UniteSortie, demarche: &mut Demarche) -> Valeur {
    if !v.avec_unite {
        return v;
    }
    let grandeur = sortie.depuis_metres(&v.grandeur);
    demarche.note(format!(
        "Converted to {}: {}",
        sortie.libelle(),
        format_rat_pretty(&grandeur)
    ));
    Valeur::longueur(grandeur)
}
