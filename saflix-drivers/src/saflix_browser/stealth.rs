use saflix_common::{BrowserConfig, StealthLevel};

/// Construct Chrome command-line arguments for a session.
///
/// The sandbox/GPU flags are required for the constrained environments this
/// backend deploys into; the rest mask the usual automation tells. The
/// user-agent and window size come from the immutable [`BrowserConfig`], not
/// per-call overrides: every page this driver ever opens is a mobile page.
pub fn build_launch_arguments(config: &BrowserConfig) -> Vec<String> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-infobars".to_string(),
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-accelerated-2d-canvas".to_string(),
        "--disable-gpu".to_string(),
        "--single-process".to_string(),
        "--disable-extensions".to_string(),
        format!("--user-agent={}", config.user_agent),
        format!("--window-size={},{}", config.viewport.0, config.viewport.1),
    ];
    if config.headless {
        args.push("--headless".to_string());
    }
    args
}

/// JavaScript evasions applied at page load to reduce automation signals.
pub struct StealthScripts;

impl StealthScripts {
    /// Baseline evasions applied at every stealth level. Spoofs the touch
    /// and platform surface to match the fixed iPhone user-agent, since a
    /// desktop `navigator` under a mobile UA is itself a bot signal.
    pub fn get_core_evasions() -> &'static str {
        r#"
            Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
            Object.defineProperty(navigator, 'platform', { get: () => 'iPhone' });
            Object.defineProperty(navigator, 'vendor', { get: () => 'Apple Computer, Inc.' });
            Object.defineProperty(navigator, 'maxTouchPoints', { get: () => 5 });
            Object.defineProperty(navigator, 'languages', {
                get: () => ['en-US', 'en']
            });
        "#
    }

    pub fn get_webgl_evasions() -> &'static str {
        r#"
            const getParameter = WebGLRenderingContext.prototype.getParameter;
            WebGLRenderingContext.prototype.getParameter = function(parameter) {
                if (parameter === 37445) return 'Apple Inc.';
                if (parameter === 37446) return 'Apple GPU';
                return getParameter.call(this, parameter);
            };
        "#
    }

    pub fn get_canvas_evasions() -> &'static str {
        r#"
            const getContext = HTMLCanvasElement.prototype.getContext;
            HTMLCanvasElement.prototype.getContext = function(type,...args){
                const ctx = getContext.call(this,type,...args);
                if(type==='2d' && ctx) {
                    const origToDataURL=this.toDataURL;
                    this.toDataURL=function(...a){
                        const imgdata=ctx.getImageData(0,0,this.width,this.height);
                        for(let i=0;i<imgdata.data.length;i+=4){
                            if(Math.random()<0.001)imgdata.data[i]+=Math.random()<0.5?-1:1;
                        }
                        ctx.putImageData(imgdata,0,0);
                        return origToDataURL.call(this,...a);
                    };
                }
                return ctx;
            };
        "#
    }
}

/// Which script bundles a given level applies, in order.
pub fn scripts_for_level(level: &StealthLevel) -> Vec<&'static str> {
    let mut scripts = vec![StealthScripts::get_core_evasions()];
    match level {
        StealthLevel::Lightweight => {}
        StealthLevel::Balanced => {
            scripts.push(StealthScripts::get_canvas_evasions());
        }
        StealthLevel::Maximum => {
            scripts.push(StealthScripts::get_canvas_evasions());
            scripts.push(StealthScripts::get_webgl_evasions());
        }
    }
    scripts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_arguments_carry_fixed_profile() {
        let config = BrowserConfig::default();
        let args = build_launch_arguments(&config);

        assert!(args.iter().any(|a| a == "--no-sandbox"));
        assert!(args.iter().any(|a| a == "--disable-gpu"));
        assert!(args
            .iter()
            .any(|a| a.starts_with("--user-agent=") && a.contains("iPhone")));
        assert!(args.iter().any(|a| a == "--headless"));
    }

    #[test]
    fn headed_sessions_drop_the_headless_flag() {
        let config = BrowserConfig {
            headless: false,
            ..BrowserConfig::default()
        };
        let args = build_launch_arguments(&config);
        assert!(!args.iter().any(|a| a == "--headless"));
    }

    #[test]
    fn stealth_levels_are_ordered_by_script_count() {
        let light = scripts_for_level(&StealthLevel::Lightweight).len();
        let balanced = scripts_for_level(&StealthLevel::Balanced).len();
        let maximum = scripts_for_level(&StealthLevel::Maximum).len();
        assert!(light < balanced && balanced < maximum);
    }
}
