//! Guest-side bridge installer
//!
//! The script below runs in every frame at document creation. It finds
//! copy controls near code blocks, encodes their text and sends it through
//! the clipboard bridge. The DOM heuristics are untrusted glue; only the
//! wire shape they emit is contractual, and the host re-validates
//! everything they send.

/// Placeholder substituted with the per-process bridge prefix.
const BRIDGE_PREFIX_PLACEHOLDER: &str = "__AXON_CLIPBOARD_PREFIX_PLACEHOLDER__";

const COPY_BRIDGE_SCRIPT: &str = r#"
(() => {
  const host = window.location.hostname || "";
  const trusted = /(^|\.)chatgpt\.com$/i.test(host)
    || /(^|\.)openai\.com$/i.test(host)
    || /(^|\.)oaistatic\.com$/i.test(host);
  if (!trusted) {
    return;
  }
  if (window.__axonCopyBridgeInstalled) {
    return;
  }
  window.__axonCopyBridgeInstalled = true;

  // Capture the transport early so later page monkeypatching cannot spoof
  // bridge behavior
  const internals = window.__TAURI_INTERNALS__;
  const nativeInvoke = internals && typeof internals.invoke === "function"
    ? internals.invoke.bind(internals)
    : null;
  const claimedOrigin = window.location.origin || "";
  const copyPrefix = "__AXON_CLIPBOARD_PREFIX_PLACEHOLDER__";

  const turnContainer = (control) => {
    return control.closest("article,[data-testid*='conversation-turn'],li[data-message-author-role],div[data-message-author-role]")
      || document;
  };

  const looksLikeCopyControl = (control) => {
    if (!(control instanceof Element)) {
      return false;
    }
    const testId = (control.getAttribute("data-testid") || "").toLowerCase();
    const ariaLabel = (control.getAttribute("aria-label") || "").toLowerCase();
    const text = (control.textContent || "").toLowerCase();
    if (!(testId.includes("copy") || ariaLabel.includes("copy") || text.includes("copy"))) {
      return false;
    }
    const scope = control.closest("article,[data-testid*='conversation-turn'],li[data-message-author-role],div[data-message-author-role],div")
      || control.parentElement
      || document;
    return !!scope.querySelector("pre code, pre");
  };

  const controlFromEvent = (event) => {
    if (typeof event.composedPath === "function") {
      for (const node of event.composedPath()) {
        if (!(node instanceof Element)) {
          continue;
        }
        const isButton = node.tagName === "BUTTON"
          || (node.getAttribute("role") || "").toLowerCase() === "button";
        if (isButton && looksLikeCopyControl(node)) {
          return node;
        }
      }
    }
    if (event.target instanceof Element) {
      const candidate = event.target.closest("button,[role='button']");
      if (candidate && looksLikeCopyControl(candidate)) {
        return candidate;
      }
    }
    return null;
  };

  const preFromAncestors = (control) => {
    let node = control;
    for (let depth = 0; depth < 10 && node; ++depth, node = node.parentElement) {
      const found = node.querySelector?.("pre code, pre");
      if (found) {
        return found.closest("pre") || found;
      }
    }
    return null;
  };

  const nearestVisiblePre = (control) => {
    const pres = Array.from(turnContainer(control).querySelectorAll("pre"));
    const controlRect = control.getBoundingClientRect();
    const cx = controlRect.left + controlRect.width / 2;
    const cy = controlRect.top + controlRect.height / 2;

    let best = null;
    let bestDistance = Number.POSITIVE_INFINITY;
    for (const pre of pres) {
      const rect = pre.getBoundingClientRect();
      if (rect.width === 0 || rect.height === 0) {
        continue;
      }
      const dx = cx - (rect.left + rect.width / 2);
      const dy = cy - (rect.top + rect.height / 2);
      const distance = dx * dx + dy * dy;
      if (distance < bestDistance) {
        bestDistance = distance;
        best = pre;
      }
    }
    return best;
  };

  const codeTextNear = (control) => {
    const pre = preFromAncestors(control) || nearestVisiblePre(control);
    if (!pre) {
      return "";
    }
    const code = pre.querySelector("code");
    const text = code ? (code.textContent || "") : (pre.textContent || "");
    return text.replace(/\r\n/g, "\n");
  };

  const base64FromText = (text) => {
    if (typeof text !== "string" || text.length === 0) {
      return "";
    }
    const utf8 = new TextEncoder().encode(text);
    let binary = "";
    const chunkSize = 0x4000;
    for (let start = 0; start < utf8.length; start += chunkSize) {
      let chunk = "";
      for (let index = start; index < Math.min(start + chunkSize, utf8.length); ++index) {
        chunk += String.fromCharCode(utf8[index]);
      }
      binary += chunk;
    }
    return btoa(binary);
  };

  const sendNativeCopy = async (text) => {
    const base64 = base64FromText(text);
    if (!base64 || !nativeInvoke) {
      return false;
    }
    try {
      // The host answers "ok" only after a validated clipboard commit
      const response = await nativeInvoke("bridge_prompt", {
        origin: claimedOrigin,
        message: `${copyPrefix}${base64}`,
      });
      return response === "ok";
    } catch (_) {
      return false;
    }
  };

  document.addEventListener("pointerdown", (event) => {
    const control = controlFromEvent(event);
    if (!control) {
      return;
    }

    const codeText = codeTextNear(control);
    if (!codeText || !codeText.trim()) {
      return;
    }

    // The site copy handler still runs; the native re-assert wins the race
    sendNativeCopy(codeText).then((wasCopied) => {
      if (wasCopied) {
        setTimeout(() => {
          sendNativeCopy(codeText);
        }, 150);
      }
    });
  }, true);
})();
"#;

/// Bridge script with the per-process prefix substituted in. The JS source
/// stays static while the secret rotates each process start.
pub fn copy_bridge_script(prefix: &str) -> String {
    COPY_BRIDGE_SCRIPT.replace(BRIDGE_PREFIX_PLACEHOLDER, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_substituted() {
        let script = copy_bridge_script("__AXON_CLIPBOARD__secret__");
        assert!(script.contains("__AXON_CLIPBOARD__secret__"));
        assert!(!script.contains(BRIDGE_PREFIX_PLACEHOLDER));
    }
}
